use crate::app::App;
use crate::input::InputAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::Back => app.go_back(),
        InputAction::MoveUp => app.move_cursor(false),
        InputAction::MoveDown => app.move_cursor(true),
        InputAction::MoveLeft => app.adjust_value(false),
        InputAction::MoveRight => app.adjust_value(true),
        InputAction::NextTab => app.cycle_tab(true),
        InputAction::PrevTab => app.cycle_tab(false),
        InputAction::Activate => app.activate_primary(),
        InputAction::GotIt => app.score_card(),
        InputAction::SkipCard => app.skip_card(),
        InputAction::NextCard => app.next_card(),
        InputAction::ToggleHint => app.toggle_hint(),
        InputAction::ToggleTimer => app.toggle_timer(),
        InputAction::ResetTimer => app.reset_timer(),
        InputAction::EndTurn => app.end_turn(),
        InputAction::GoRambo => app.go_rambo(),
        InputAction::AddCard => app.open_add_card_prompt(),
        InputAction::DeleteCard => app.delete_selected_card(),
        InputAction::ImportCards => app.open_import_prompt(),
        InputAction::ExportCards => app.open_export_prompt(),
    }
}
