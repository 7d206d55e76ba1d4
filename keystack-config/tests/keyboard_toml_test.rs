use keystack::config::{OneShotConfig, TriLayerConfig};
use keystack::types::action::{Action, KeyAction};
use keystack::types::keycode::{HidKeyCode, KeyCode};
use keystack::types::modifier::ModifierCombination;
use keystack::{KeyMap, k, mo, pdf, shifted};
use keystack_config::{ConfigError, KeyboardTomlConfig};

const SMALL_KEYBOARD: &str = r#"
[keyboard]
name = "small"

[layout]
rows = 2
cols = 3
layers = 4

[aliases]
lower = "MO(lower)"

[[layer]]
name = "base"
keys = """
Q W E
@lower MO(raise) PDF(3)
"""

[[layer]]
name = "lower"
keys = """
exlm at _
_    _  _
"""

[[layer]]
name = "raise"
keys = "1 2 3"

[behavior.tri_layer]
lower = "lower"
upper = 2
adjust = "adjust"

[behavior.one_shot]
timeout = "2s"

[storage]
num_sectors = 4
"#;

fn with_base_layer(keys: &str) -> String {
    format!(
        r#"
[layout]
rows = 1
cols = 2
layers = 2

[[layer]]
keys = "{}"
"#,
        keys
    )
}

#[test]
fn test_load_small_keyboard() {
    let config = KeyboardTomlConfig::new_from_toml_str(SMALL_KEYBOARD).unwrap();
    assert_eq!(config.name(), "small");

    let layout = config.get_layout_config().unwrap();
    assert_eq!(
        layout.layer_names,
        vec![
            Some("base".to_string()),
            Some("lower".to_string()),
            Some("raise".to_string()),
            None
        ]
    );
    // The fourth layer is only named by the tri-layer config, it's filled with transparent keys
    assert_eq!(layout.layer_index("adjust"), None);

    let keymap = layout.to_keymap::<2, 3, 4>().unwrap();
    assert_eq!(keymap[0][0], [k!(Q), k!(W), k!(E)]);
    assert_eq!(keymap[0][1], [mo!(1), mo!(2), pdf!(3)]);
    assert_eq!(keymap[1][0], [shifted!(Kc1), shifted!(Kc2), KeyAction::Transparent]);
    // Positions without a key are No
    assert_eq!(keymap[2][1], [KeyAction::No; 3]);
    assert_eq!(keymap[3], [[KeyAction::Transparent; 3]; 2]);
}

#[test]
fn test_tri_layer_names_must_be_defined() {
    // `adjust` has no [[layer]] entry with that name
    let config = KeyboardTomlConfig::new_from_toml_str(SMALL_KEYBOARD).unwrap();
    let result = config
        .get_layout_config()
        .and_then(|layout| config.get_behavior_config(&layout));
    assert_eq!(
        result.map(|_| ()),
        Err(ConfigError::UndefinedLayer {
            field: "behavior.tri_layer.adjust".to_string(),
            layer: "adjust".to_string()
        })
    );
}

#[test]
fn test_behavior_and_storage_config() {
    let toml = SMALL_KEYBOARD.replace("adjust = \"adjust\"", "adjust = 3");
    let config = KeyboardTomlConfig::new_from_toml_str(&toml).unwrap();
    let layout = config.get_layout_config().unwrap();
    let behavior = config.get_behavior_config(&layout).unwrap();
    assert_eq!(behavior.tri_layer, Some(TriLayerConfig::new(1, 2, 3)));
    assert_eq!(behavior.one_shot.timeout_ms, 2000);

    let storage = config.get_storage_config().unwrap();
    assert_eq!(storage.num_sectors, 4);
    assert_eq!(storage.start_addr, 0);
    assert!(!storage.clear_storage);
}

#[test]
fn test_default_behavior() {
    let config = KeyboardTomlConfig::new_from_toml_str(&with_base_layer("A B")).unwrap();
    let layout = config.get_layout_config().unwrap();
    let behavior = config.get_behavior_config(&layout).unwrap();
    assert_eq!(behavior.tri_layer, None);
    assert_eq!(behavior.one_shot.timeout_ms, OneShotConfig::default().timeout_ms);
    assert_eq!(config.get_storage_config().unwrap().num_sectors, 2);
}

#[test]
fn test_resolve_loaded_keymap() {
    let toml = SMALL_KEYBOARD.replace("adjust = \"adjust\"", "adjust = 3");
    let config = KeyboardTomlConfig::new_from_toml_str(&toml).unwrap();
    let layout = config.get_layout_config().unwrap();
    let behavior = config.get_behavior_config(&layout).unwrap();
    let layers = layout.to_keymap::<2, 3, 4>().unwrap();

    let mut keymap = KeyMap::new(&layers, behavior);
    assert_eq!(keymap.resolve(0, 0), k!(Q));
    keymap.activate_layer(1);
    assert_eq!(
        keymap.resolve(0, 0),
        KeyAction::Single(Action::KeyWithModifier(
            KeyCode::Hid(HidKeyCode::Kc1),
            ModifierCombination::LSHIFT
        ))
    );
    // Transparent on lower, falls through to base
    assert_eq!(keymap.resolve(0, 2), k!(E));
}

#[test]
fn test_matrix_map() {
    let toml = r#"
[layout]
rows = 2
cols = 2
layers = 1
matrix_map = "(1,1) (0,0) (1,0)"

[[layer]]
keys = "A B C"
"#;
    let config = KeyboardTomlConfig::new_from_toml_str(toml).unwrap();
    let keymap = config.get_layout_config().unwrap().to_keymap::<2, 2, 1>().unwrap();
    assert_eq!(keymap[0], [[k!(B), KeyAction::No], [k!(C), k!(A)]]);

    let out_of_bounds = toml.replace("(1,0)", "(2,0)");
    let config = KeyboardTomlConfig::new_from_toml_str(&out_of_bounds).unwrap();
    assert!(matches!(
        config.get_layout_config(),
        Err(ConfigError::Validation { field, .. }) if field == "layout.matrix_map"
    ));

    let duplicated = toml.replace("(1,0)", "(0,0)");
    let config = KeyboardTomlConfig::new_from_toml_str(&duplicated).unwrap();
    assert!(config.get_layout_config().is_err());
}

#[test]
fn test_transparent_base_layer_is_rejected() {
    let config = KeyboardTomlConfig::new_from_toml_str(&with_base_layer("A _")).unwrap();
    assert!(matches!(
        config.get_layout_config(),
        Err(ConfigError::Validation { message, .. }) if message.contains("Transparent")
    ));
}

#[test]
fn test_too_many_keys() {
    let config = KeyboardTomlConfig::new_from_toml_str(&with_base_layer("A B C")).unwrap();
    assert!(config.get_layout_config().is_err());
}

#[test]
fn test_layer_number_out_of_range() {
    let config = KeyboardTomlConfig::new_from_toml_str(&with_base_layer("A TG(2)")).unwrap();
    assert_eq!(
        config.get_layout_config(),
        Err(ConfigError::UndefinedLayer {
            field: "layer[0]".to_string(),
            layer: "2".to_string()
        })
    );
}

#[test]
fn test_keymap_size_mismatch() {
    let config = KeyboardTomlConfig::new_from_toml_str(&with_base_layer("A B")).unwrap();
    let layout = config.get_layout_config().unwrap();
    assert!(layout.to_keymap::<1, 2, 2>().is_ok());
    assert!(layout.to_keymap::<2, 2, 2>().is_err());
}

#[test]
fn test_unknown_field() {
    let toml = with_base_layer("A B").replace("layers = 2", "layers = 2\ndebounce = 5");
    assert!(matches!(
        KeyboardTomlConfig::new_from_toml_str(&toml),
        Err(ConfigError::TomlParse { .. })
    ));
}

#[test]
fn test_invalid_duration() {
    let toml = format!("{}\n[behavior.one_shot]\ntimeout = \"2min\"\n", with_base_layer("A B"));
    assert!(matches!(
        KeyboardTomlConfig::new_from_toml_str(&toml),
        Err(ConfigError::TomlParse { message, .. }) if message.contains("unit")
    ));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        KeyboardTomlConfig::new_from_toml_path("does/not/exist/keyboard.toml"),
        Err(ConfigError::FileRead { .. })
    ));
}

#[test]
fn test_modifier_key_from_toml() {
    let config = KeyboardTomlConfig::new_from_toml_str(&with_base_layer("MOD(LCtrl | LAlt) Delete")).unwrap();
    let layers = config.get_layout_config().unwrap().to_keymap::<1, 2, 2>().unwrap();

    let keymap = KeyMap::new(&layers, Default::default());
    assert_eq!(
        keymap.resolve(0, 0),
        KeyAction::Single(Action::Modifier(ModifierCombination::LCTRL | ModifierCombination::LALT))
    );
    assert_eq!(keymap.resolve(0, 1), k!(Delete));
}
