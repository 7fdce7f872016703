//! Parsing of single prompt lines into session replies.

use carpark_core::*;

/// `w`/`a`/`s`/`d` move, `r` removes, `q` quits, case-insensitive.
pub(crate) fn parse_command(line: &str) -> Reply<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "w" => Reply::Given(Command::Move(Direction::Up)),
        "s" => Reply::Given(Command::Move(Direction::Down)),
        "a" => Reply::Given(Command::Move(Direction::Left)),
        "d" => Reply::Given(Command::Move(Direction::Right)),
        "r" => Reply::Given(Command::Remove),
        "q" => Reply::Quit,
        _ => Reply::Invalid(GameError::InvalidCommand),
    }
}

/// One-based `row col` pair, separated by spaces or a comma, to zero-based coordinates.
pub(crate) fn parse_selection(line: &str) -> Reply<Coord2> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        return Reply::Quit;
    }

    let parts: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .collect();
    let [row, col] = parts.as_slice() else {
        return Reply::Invalid(GameError::InvalidCommand);
    };

    match (to_coord(row), to_coord(col)) {
        (Ok(row), Ok(col)) => Reply::Given((row, col)),
        (Err(err), _) | (_, Err(err)) => Reply::Invalid(err),
    }
}

/// Non-numbers are malformed input, numbers outside `1..=256` are off the lot.
fn to_coord(part: &str) -> Result<Coord> {
    let one_based: i64 = part.parse().map_err(|_| GameError::InvalidCommand)?;
    one_based
        .checked_sub(1)
        .and_then(|zero_based| Coord::try_from(zero_based).ok())
        .ok_or(GameError::InvalidPosition)
}

/// `y` advances to the next level, `q` quits.
pub(crate) fn parse_confirm(line: &str) -> Reply<()> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" => Reply::Given(()),
        "q" => Reply::Quit,
        _ => Reply::Invalid(GameError::InvalidCommand),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_follow_wasd_mapping() {
        assert_eq!(parse_command("w\n"), Reply::Given(Command::Move(Direction::Up)));
        assert_eq!(parse_command("S"), Reply::Given(Command::Move(Direction::Down)));
        assert_eq!(parse_command(" a "), Reply::Given(Command::Move(Direction::Left)));
        assert_eq!(parse_command("d"), Reply::Given(Command::Move(Direction::Right)));
        assert_eq!(parse_command("R"), Reply::Given(Command::Remove));
        assert_eq!(parse_command("q"), Reply::Quit);
    }

    #[test]
    fn unknown_commands_are_reported() {
        for line in ["", "x", "ww", "up", "1"] {
            assert_eq!(
                parse_command(line),
                Reply::Invalid(GameError::InvalidCommand),
                "{:?}",
                line
            );
        }
    }

    #[test]
    fn selection_is_converted_to_zero_based() {
        assert_eq!(parse_selection("2 3\n"), Reply::Given((1, 2)));
        assert_eq!(parse_selection("1,1"), Reply::Given((0, 0)));
        assert_eq!(parse_selection("  7   7 "), Reply::Given((6, 6)));
        assert_eq!(parse_selection("Q"), Reply::Quit);
    }

    #[test]
    fn selection_rejects_malformed_and_out_of_range() {
        assert_eq!(parse_selection("2"), Reply::Invalid(GameError::InvalidCommand));
        assert_eq!(parse_selection("2 3 4"), Reply::Invalid(GameError::InvalidCommand));
        assert_eq!(parse_selection("a b"), Reply::Invalid(GameError::InvalidCommand));
        assert_eq!(parse_selection("0 2"), Reply::Invalid(GameError::InvalidPosition));
        assert_eq!(parse_selection("2 1000"), Reply::Invalid(GameError::InvalidPosition));
    }

    #[test]
    fn negative_selection_is_an_invalid_position() {
        assert_eq!(parse_selection("-1 2"), Reply::Invalid(GameError::InvalidPosition));
        assert_eq!(parse_selection("3 -4"), Reply::Invalid(GameError::InvalidPosition));
        assert_eq!(parse_selection("-1 x"), Reply::Invalid(GameError::InvalidPosition));
        assert_eq!(
            parse_selection("-9223372036854775808 1"),
            Reply::Invalid(GameError::InvalidPosition)
        );
    }

    #[test]
    fn confirm_accepts_yes_or_quit() {
        assert_eq!(parse_confirm("Y"), Reply::Given(()));
        assert_eq!(parse_confirm("q"), Reply::Quit);
        assert_eq!(parse_confirm("n"), Reply::Invalid(GameError::InvalidCommand));
    }
}
