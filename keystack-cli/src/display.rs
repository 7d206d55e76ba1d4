use keystack::types::action::{Action, KeyAction};
use keystack::types::keycode::KeyCode;
use keystack::types::modifier::ModifierCombination;
use keystack_config::LayoutConfig;

pub(crate) fn layer_title(layout: &LayoutConfig, layer_num: u8) -> String {
    match layout.layer_names.get(layer_num as usize).cloned().flatten() {
        Some(name) => format!("Layer {} ({})", layer_num, name),
        None => format!("Layer {}", layer_num),
    }
}

/// Print rows of actions as an aligned table
pub(crate) fn print_grid<'a>(rows: impl Iterator<Item = &'a [KeyAction]>) {
    let cells: Vec<Vec<String>> = rows.map(|row| row.iter().map(format_action).collect()).collect();
    let width = cells.iter().flatten().map(String::len).max().unwrap_or(0);
    for row in cells {
        let line: Vec<String> = row.iter().map(|c| format!("{:width$}", c, width = width)).collect();
        println!("  {}", line.join(" ").trim_end());
    }
}

/// Short name of an action, in `keyboard.toml` syntax
pub(crate) fn format_action(action: &KeyAction) -> String {
    match action {
        KeyAction::No => "XXX".to_string(),
        KeyAction::Transparent => "___".to_string(),
        KeyAction::Single(a) => match a {
            Action::No => "No".to_string(),
            Action::Key(k) => format_keycode(k),
            Action::KeyWithModifier(k, m) if *m == ModifierCombination::LSHIFT => format!("S({})", format_keycode(k)),
            Action::KeyWithModifier(k, m) => format!("WM({}, {})", format_keycode(k), format_modifiers(*m)),
            Action::Modifier(m) => format!("MOD({})", format_modifiers(*m)),
            Action::LayerOn(l) => format!("MO({})", l),
            Action::LayerToggle(l) => format!("TG({})", l),
            Action::LayerToggleOnly(l) => format!("TO({})", l),
            Action::OneShotLayer(l) => format!("OSL({})", l),
            Action::DefaultLayer(l) => format!("DF({})", l),
            Action::PersistentDefaultLayer(l) => format!("PDF({})", l),
            Action::TriLayerLower => "TL_LOWER".to_string(),
            Action::TriLayerUpper => "TL_UPPER".to_string(),
        },
    }
}

fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Hid(k) => format!("{:?}", k),
        KeyCode::Consumer(k) => format!("{:?}", k),
        KeyCode::SystemControl(k) => format!("{:?}", k),
        KeyCode::Special(k) => format!("{:?}", k),
    }
}

fn format_modifiers(m: ModifierCombination) -> String {
    let side = if m.right() { "R" } else { "L" };
    let names: Vec<String> = [
        (m.ctrl(), "Ctrl"),
        (m.shift(), "Shift"),
        (m.alt(), "Alt"),
        (m.gui(), "Gui"),
    ]
    .into_iter()
    .filter(|(on, _)| *on)
    .map(|(_, name)| format!("{}{}", side, name))
    .collect();
    names.join(" | ")
}

#[cfg(test)]
mod tests {
    use keystack::{a, k, mo, pdf, shifted, sp, tl_lower, wm};

    use super::*;

    #[test]
    fn test_format_action() {
        assert_eq!(format_action(&k!(Q)), "Q");
        assert_eq!(format_action(&a!(Transparent)), "___");
        assert_eq!(format_action(&shifted!(Kc1)), "S(Kc1)");
        assert_eq!(format_action(&wm!(sp!(BacklightStep), RSHIFT)), "WM(BacklightStep, RShift)");
        assert_eq!(format_action(&mo!(2)), "MO(2)");
        assert_eq!(
            format_action(&KeyAction::Single(Action::Modifier(ModifierCombination::LCTRL | ModifierCombination::LALT))),
            "MOD(LCtrl | LAlt)"
        );
        assert_eq!(format_action(&pdf!(0)), "PDF(0)");
        assert_eq!(format_action(&tl_lower!()), "TL_LOWER");
    }
}
