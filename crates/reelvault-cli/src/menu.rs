use crate::output::Output;
use crate::{prompts, render, selection};
use color_eyre::Result;
use movie_library_config::SearchOptions;
use movie_library_models::MovieRecord;
use movie_library_provider::MetadataProvider;
use movie_library_store::MovieStore;

const TOP_MENU: &str = "Please select one of the following options:\n\n\
                        1. Add movie\n\
                        2. Remove movie\n\
                        3. Mark as watched\n\
                        4. Add a note\n\
                        5. View movie info\n\
                        6. View all\n\
                        7. Search menu\n\
                        8. Additional actions\n\
                        9. Exit (or press Enter)";

const SEARCH_MENU: &str = "Please select one of the following options:\n\n\
                           1. Search by Title\n\
                           2. Search by Director\n\
                           3. Search by Genre\n\
                           4. Search by Year\n\
                           5. Back to menu";

const MISC_MENU: &str = "Please select one of the following options:\n\n\
                         1. Delete database\n\
                         2. Mark movie as unwatched\n\
                         3. Back to menu";

const DELETE_CONFIRMATION_PHRASE: &str = "DELETE DATABASE";

#[derive(Debug, PartialEq, Eq)]
enum Choice {
    Blank,
    Number(u32),
    Invalid,
}

fn parse_choice(input: &str) -> Choice {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Choice::Blank;
    }
    match trimmed.parse::<u32>() {
        Ok(number) => Choice::Number(number),
        Err(_) => Choice::Invalid,
    }
}

/// Top-level menu loop. Returns when the user exits (explicitly or with
/// blank input) or after a confirmed database deletion.
pub async fn run(
    store: &MovieStore,
    provider: &dyn MetadataProvider,
    options: &SearchOptions,
    output: &Output,
) -> Result<()> {
    loop {
        output.println(TOP_MENU);
        let line = prompts::read_line(">>")?;
        match parse_choice(&line) {
            Choice::Blank | Choice::Number(9) => {
                output.info("Exiting");
                return Ok(());
            }
            Choice::Invalid => {
                output.error("Invalid input. Please enter a number between 1 and 9.");
            }
            Choice::Number(1) => add_movie(store, provider, options, output).await?,
            Choice::Number(2) => remove_movie(store, output).await?,
            Choice::Number(3) => mark_watched(store, output, true).await?,
            Choice::Number(4) => add_note(store, output).await?,
            Choice::Number(5) => view_info(store, output).await?,
            Choice::Number(6) => view_all(store, output).await?,
            Choice::Number(7) => search_menu(store, output).await?,
            Choice::Number(8) => {
                if misc_menu(store, output).await? {
                    // The database was deleted; nothing left to manage.
                    return Ok(());
                }
            }
            Choice::Number(_) => {}
        }
        output.println("");
    }
}

async fn add_movie(
    store: &MovieStore,
    provider: &dyn MetadataProvider,
    options: &SearchOptions,
    output: &Output,
) -> Result<()> {
    let title = prompts::read_title()?;
    if title.is_empty() {
        output.error("No title entered.");
        return Ok(());
    }

    match selection::pick_movie(provider, &title, options, output).await {
        Ok(Some(movie)) => match store.create(&movie).await {
            Ok(()) => {
                output.success(format!("\"{}\" has been added to the library!", movie.title))
            }
            Err(e) => output.error(e.to_string()),
        },
        Ok(None) => output.info("Cancelled."),
        Err(e) => output.error(e.to_string()),
    }
    Ok(())
}

async fn remove_movie(store: &MovieStore, output: &Output) -> Result<()> {
    let title = prompts::read_title()?;
    match store.delete(&title).await {
        Ok(()) => output.success(format!("\"{}\" has been removed from the library!", title)),
        Err(e) => output.error(e.to_string()),
    }
    Ok(())
}

async fn mark_watched(store: &MovieStore, output: &Output, watched: bool) -> Result<()> {
    let title = prompts::read_title()?;
    match store.set_watched(&title, watched).await {
        Ok(()) => output.success(format!(
            "Marked \"{}\" as {}.",
            title,
            if watched { "watched" } else { "unwatched" }
        )),
        Err(e) => output.error(e.to_string()),
    }
    Ok(())
}

async fn add_note(store: &MovieStore, output: &Output) -> Result<()> {
    let title = prompts::read_title()?;
    let note = prompts::read_line("Note")?;
    match store.set_notes(&title, &note).await {
        Ok(()) => output.success(format!("Note saved for \"{}\".", title)),
        Err(e) => output.error(e.to_string()),
    }
    Ok(())
}

async fn view_info(store: &MovieStore, output: &Output) -> Result<()> {
    let title = prompts::read_title()?;
    match store.find_one(&title).await {
        Ok(movie) => {
            output.println("");
            for line in render::record_lines(&movie) {
                output.println(line);
            }
        }
        Err(e) => output.error(e.to_string()),
    }
    Ok(())
}

async fn view_all(store: &MovieStore, output: &Output) -> Result<()> {
    match store.find_all().await {
        Ok(movies) if movies.is_empty() => {
            output.info(
                "No movies currently in the library. \
                 Add a movie using the \"Add movie\" option.",
            );
        }
        Ok(movies) => {
            print_movie_list(&movies, output);
            prompts::read_line("Press Enter to continue")?;
        }
        Err(e) => output.error(e.to_string()),
    }
    Ok(())
}

fn print_movie_list(movies: &[MovieRecord], output: &Output) {
    for movie in movies {
        output.println(render::DIVIDER_LINE);
        for line in render::record_lines(movie) {
            output.println(line);
        }
    }
    output.println(render::DIVIDER_LINE);
}

fn print_search_results(movies: &[MovieRecord], output: &Output) {
    if movies.is_empty() {
        output.info("No movies found. Add a movie using the \"Add movie\" option.");
        return;
    }
    print_movie_list(movies, output);
}

async fn search_menu(store: &MovieStore, output: &Output) -> Result<()> {
    loop {
        output.println(SEARCH_MENU);
        let line = prompts::read_line(">>")?;
        let results = match parse_choice(&line) {
            Choice::Number(1) => {
                let needle = prompts::read_title()?;
                store.find_by_title_substring(&needle).await
            }
            Choice::Number(2) => {
                let needle = prompts::read_line("Director")?;
                store.find_by_director_substring(needle.trim()).await
            }
            Choice::Number(3) => {
                let needle = prompts::read_line("Genre")?;
                store.find_by_genre_substring(needle.trim()).await
            }
            Choice::Number(4) => {
                let line = prompts::read_line("Year")?;
                match line.trim().parse::<u32>() {
                    Ok(year) => store.find_by_year(year).await,
                    Err(_) => {
                        output.error("Invalid input. Please enter a year.");
                        continue;
                    }
                }
            }
            Choice::Number(5) => return Ok(()),
            Choice::Invalid => {
                output.error("Invalid input. Please enter a number between 1 and 5.");
                continue;
            }
            Choice::Blank | Choice::Number(_) => continue,
        };

        match results {
            Ok(movies) => print_search_results(&movies, output),
            Err(e) => output.error(e.to_string()),
        }
        return Ok(());
    }
}

/// Returns `true` when the database was deleted and the program should
/// exit.
async fn misc_menu(store: &MovieStore, output: &Output) -> Result<bool> {
    loop {
        output.println(MISC_MENU);
        let line = prompts::read_line(">>")?;
        match parse_choice(&line) {
            Choice::Number(1) => return delete_database(store, output).await,
            Choice::Number(2) => {
                mark_watched(store, output, false).await?;
                return Ok(false);
            }
            Choice::Number(3) => return Ok(false),
            Choice::Invalid => {
                output.error("Invalid input. Please enter a number between 1 and 3.");
            }
            Choice::Blank | Choice::Number(_) => {}
        }
    }
}

/// Whole-store deletion is gated behind a typed confirmation phrase, not
/// a y/n prompt.
async fn delete_database(store: &MovieStore, output: &Output) -> Result<bool> {
    output.warn("Are you sure you want to delete the movie database?");
    output.println(format!(
        "Type \"{}\" to confirm:",
        DELETE_CONFIRMATION_PHRASE
    ));

    let confirmation = prompts::read_line(">>")?;
    if confirmation != DELETE_CONFIRMATION_PHRASE {
        output.info("Deletion aborted.");
        return Ok(false);
    }

    match store.drop_all().await {
        Ok(()) => {
            output.success("The movie database has been deleted. Exiting.");
            Ok(true)
        }
        Err(e) => {
            output.error(e.to_string());
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_the_exit_choice() {
        assert_eq!(parse_choice(""), Choice::Blank);
        assert_eq!(parse_choice("   "), Choice::Blank);
    }

    #[test]
    fn test_numeric_input_is_parsed_with_whitespace() {
        assert_eq!(parse_choice("9"), Choice::Number(9));
        assert_eq!(parse_choice(" 3 "), Choice::Number(3));
    }

    #[test]
    fn test_non_numeric_input_is_invalid() {
        assert_eq!(parse_choice("abc"), Choice::Invalid);
        assert_eq!(parse_choice("1a"), Choice::Invalid);
        assert_eq!(parse_choice("-1"), Choice::Invalid);
    }
}
