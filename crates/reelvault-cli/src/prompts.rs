use color_eyre::Result;
use dialoguer::Input;

/// Read one line from the terminal; blank input is allowed and returned
/// as an empty string.
pub fn read_line(prompt: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a movie title; the result is trimmed.
pub fn read_title() -> Result<String> {
    Ok(read_line("Title")?.trim().to_string())
}
