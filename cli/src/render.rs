//! Plain-text frames and message strings for the terminal.

use carpark_core::*;

const RULE: &str = "----------------------------------------";

fn glyph_text(glyph: Glyph) -> String {
    match glyph {
        Glyph::Empty => ".".to_string(),
        Glyph::Exit => "0".to_string(),
        Glyph::Obstacle => "X".to_string(),
        Glyph::Vehicle(id) => id.to_string(),
        Glyph::Player => "P".to_string(),
        Glyph::PlayerOnExit => "@".to_string(),
        Glyph::Carried(id) => format!("*{}", id),
    }
}

/// Full frame: banner, lot rows padded to the widest glyph, and a status line.
pub(crate) fn frame(view: &LotView) -> String {
    let rows: Vec<Vec<String>> = view
        .rows()
        .map(|row| row.map(glyph_text).collect())
        .collect();
    let width = rows.iter().flatten().map(String::len).max().unwrap_or(1);

    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("|{:^38}|\n", "Welcome to Parking Lot"));
    out.push_str(&format!("|{:^38}|\n", format!("Level {}", view.level)));
    out.push_str(RULE);
    out.push('\n');
    for row in &rows {
        let line: Vec<String> = row.iter().map(|text| format!("{:<width$}", text)).collect();
        out.push_str(line.join(" ").trim_end());
        out.push('\n');
    }
    out.push_str(RULE);
    out.push('\n');

    out.push_str(&format!("Cars left: {}", view.vehicles_left));
    if let Some(id) = view.selected {
        out.push_str(&format!("   Carrying: {}", id));
    }
    out.push('\n');
    out.push_str("P you   @ you on the exit   0 exit   X obstacle   * carried car\n");
    out
}

pub(crate) fn notice_text(notice: Notice) -> String {
    match notice {
        Notice::Selected(id) => format!("Selected car with ID {}", id),
        Notice::Removed(id) => format!("Removed car with ID {}", id),
        Notice::Exited(id) => format!("Car {} drove out through the exit", id),
        Notice::Rejected(err) => format!("{}. Try again.", err),
        Notice::HeadToExit => "All cars are removed. Now head to the exit!".to_string(),
        Notice::LevelCleared(level) => [
            RULE.to_string(),
            format!("|{:^38}|", "Congratulations!"),
            format!("|{:^38}|", format!("You've cleared level {}", level)),
            format!("|{:^38}|", format!("Next up is level {}", level + 1)),
            RULE.to_string(),
        ]
        .join("\n"),
        Notice::AllLevelsCleared(level) => {
            format!("You've cleared level {}, the last one. Well parked!", level)
        }
        Notice::InvalidChoice => "Invalid choice. Exiting the game.".to_string(),
        Notice::Goodbye => "Exiting the game. Thank you for playing!".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(lot: &ParkingLot) -> LotView {
        LotView::from_lot(lot)
    }

    #[test]
    fn frame_draws_every_kind_of_cell() {
        let lot = ParkingLot::from_layout(1, (3, 3), &[(2, 2)], &[(1, 1)], (0, 2)).unwrap();
        let text = frame(&view(&lot));
        let grid: Vec<&str> = text.lines().skip(4).take(3).collect();

        assert_eq!(grid, ["0  .  P", ".  C1 .", ".  .  X"]);
        assert!(text.contains("Level 1"));
        assert!(text.contains("Cars left: 1"));
        assert!(!text.contains("Carrying"));
    }

    #[test]
    fn frame_marks_player_on_exit_and_carried_car() {
        let mut lot = ParkingLot::from_layout(2, (2, 2), &[], &[(1, 1)], (0, 1)).unwrap();
        lot.move_cursor(Direction::Left).unwrap();
        assert_eq!(frame(&view(&lot)).lines().nth(4), Some("@  ."));

        lot.select_vehicle((1, 1)).unwrap();
        let text = frame(&view(&lot));
        assert_eq!(text.lines().nth(5), Some(".   *C1"));
        assert!(text.contains("Carrying: C1"));
        assert!(text.contains("Level 2"));
    }

    #[test]
    fn notices_name_the_car_and_error() {
        assert_eq!(
            notice_text(Notice::Removed(VehicleId(3))),
            "Removed car with ID C3"
        );
        assert_eq!(
            notice_text(Notice::Rejected(GameError::BlockedMove)),
            "Move blocked by another car or obstacle. Try again."
        );
        assert!(notice_text(Notice::LevelCleared(1)).contains("Next up is level 2"));
        assert_eq!(
            notice_text(Notice::InvalidChoice),
            "Invalid choice. Exiting the game."
        );
    }
}
