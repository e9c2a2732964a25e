use std::io::{BufRead, Write};

use storeseed_generate::Selection;

use crate::error::CliError;

pub fn print_menu<W: Write>(output: &mut W) -> Result<(), CliError> {
    writeln!(output, "What do you want to generate?").map_err(CliError::Input)?;
    for selection in Selection::MENU {
        writeln!(output, "  {}. {}", selection.key(), selection.label())
            .map_err(CliError::Input)?;
    }
    Ok(())
}

pub fn prompt_selection<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Selection, CliError> {
    print_menu(output)?;
    let line = prompt(input, output, "Choice: ")?;
    line.parse().map_err(CliError::Choice)
}

pub fn prompt_count<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<usize, CliError> {
    let line = prompt(input, output, "How many records? ")?;
    parse_count(&line)
}

pub fn parse_count(value: &str) -> Result<usize, CliError> {
    let trimmed = value.trim();
    trimmed
        .parse()
        .map_err(|_| CliError::InvalidCount(trimmed.to_string()))
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<String, CliError> {
    write!(output, "{message}").map_err(CliError::Input)?;
    output.flush().map_err(CliError::Input)?;
    let mut line = String::new();
    input.read_line(&mut line).map_err(CliError::Input)?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use storeseed_generate::GenerationError;

    use super::*;

    #[test]
    fn menu_lists_all_seven_entries() {
        let mut output = Vec::new();
        print_menu(&mut output).expect("menu");
        let text = String::from_utf8(output).expect("utf8");
        assert!(text.contains("  1. Clients"));
        assert!(text.contains("  7. All"));
        assert_eq!(text.lines().count(), 8);
    }

    #[test]
    fn reads_choice_then_count() {
        let mut input = Cursor::new("3\n250\n");
        let mut output = Vec::new();
        let selection = prompt_selection(&mut input, &mut output).expect("choice");
        let count = prompt_count(&mut input, &mut output).expect("count");
        assert_eq!(selection, Selection::Products);
        assert_eq!(count, 250);
    }

    #[test]
    fn unknown_choice_is_an_input_error() {
        let mut input = Cursor::new("9\n");
        let err = prompt_selection(&mut input, &mut Vec::new()).expect_err("choice 9");
        assert!(matches!(
            err,
            CliError::Choice(GenerationError::UnknownChoice(ref choice)) if choice == "9"
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn count_must_be_a_non_negative_integer() {
        assert_eq!(parse_count(" 0 ").ok(), Some(0));
        for bad in ["abc", "-1", "1.5", ""] {
            assert!(matches!(parse_count(bad), Err(CliError::InvalidCount(_))));
        }
    }
}
