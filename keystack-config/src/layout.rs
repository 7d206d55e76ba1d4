use std::collections::HashMap;
use std::str::FromStr;

use keystack_types::action::{Action, KeyAction};
use keystack_types::keycode::{ConsumerKey, HidKeyCode, KeyCode, SpecialKey, SystemControlKey};
use keystack_types::modifier::ModifierCombination;
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::error::{ConfigError, ConfigResult};
use crate::{KEYCODE_ALIAS, KeyboardTomlConfig};

// Pest parser using the grammar files
#[derive(Parser)]
#[grammar = "keymap.pest"]
struct ConfigParser;

// Max alias resolution depth to prevent infinite loops
const MAX_ALIAS_RESOLUTION_DEPTH: usize = 10;

/// The keymap of `keyboard.toml`, parsed and checked against `[layout]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    pub rows: u8,
    pub cols: u8,
    pub layers: u8,
    /// Layer names, `None` for unnamed and filler layers
    pub layer_names: Vec<Option<String>>,
    /// `keymap[layer][row][col]`
    pub keymap: Vec<Vec<Vec<KeyAction>>>,
}

impl LayoutConfig {
    /// Index of a layer given by name or number
    pub fn layer_index(&self, layer: &str) -> Option<u8> {
        match layer.parse::<u8>() {
            Ok(n) => (n < self.layers).then_some(n),
            Err(_) => self
                .layer_names
                .iter()
                .position(|name| name.as_deref() == Some(layer))
                .map(|i| i as u8),
        }
    }

    /// Convert to the fixed size keymap used by `keystack::KeyMap`
    pub fn to_keymap<const ROW: usize, const COL: usize, const NUM_LAYER: usize>(
        &self,
    ) -> ConfigResult<[[[KeyAction; COL]; ROW]; NUM_LAYER]> {
        if (self.rows as usize, self.cols as usize, self.layers as usize) != (ROW, COL, NUM_LAYER) {
            return Err(ConfigError::validation(
                "layout",
                format!(
                    "The keymap is {} layers of {}x{}, expected {} layers of {}x{}",
                    self.layers, self.rows, self.cols, NUM_LAYER, ROW, COL
                ),
            ));
        }
        let mut keymap = [[[KeyAction::No; COL]; ROW]; NUM_LAYER];
        for (layer, src_layer) in keymap.iter_mut().zip(&self.keymap) {
            for (row, src_row) in layer.iter_mut().zip(src_layer) {
                row.copy_from_slice(src_row);
            }
        }
        Ok(keymap)
    }
}

impl KeyboardTomlConfig {
    /// Parse `[[layer]]` entries into a full `layers x rows x cols` keymap.
    ///
    /// Keys are placed in `layout.matrix_map` order, or row by row when there's no matrix map.
    /// Positions without a key are `No`, layers without a `[[layer]]` entry are transparent.
    pub fn get_layout_config(&self) -> ConfigResult<LayoutConfig> {
        let layout = &self.layout;
        let aliases = self.aliases.clone().unwrap_or_default();
        let layers = self.layer.clone().unwrap_or_default();

        if layout.rows == 0 || layout.cols == 0 || layout.layers == 0 {
            return Err(ConfigError::validation(
                "layout",
                "rows, cols and layers must be greater than 0",
            ));
        }

        // Check alias keys for whitespace
        for key in aliases.keys() {
            if key.chars().any(char::is_whitespace) {
                return Err(ConfigError::validation(
                    "aliases",
                    format!("Alias key '{}' must not contain whitespace characters", key),
                ));
            }
        }

        let sequence_to_grid = match &layout.matrix_map {
            Some(matrix_map) => {
                let coords = parse_matrix_map(matrix_map)?;
                let mut seen = vec![vec![false; layout.cols as usize]; layout.rows as usize];
                for (row, col) in &coords {
                    if *row >= layout.rows || *col >= layout.cols {
                        return Err(ConfigError::validation(
                            "layout.matrix_map",
                            format!(
                                "Coordinate ({},{}) is out of bounds: ([0..{}], [0..{}]) is the expected range",
                                row,
                                col,
                                layout.rows - 1,
                                layout.cols - 1
                            ),
                        ));
                    }
                    if seen[*row as usize][*col as usize] {
                        return Err(ConfigError::validation(
                            "layout.matrix_map",
                            format!("Duplicate coordinate ({},{})", row, col),
                        ));
                    }
                    seen[*row as usize][*col as usize] = true;
                }
                coords
            }
            None => (0..layout.rows)
                .flat_map(|row| (0..layout.cols).map(move |col| (row, col)))
                .collect(),
        };

        if layers.len() > layout.layers as usize {
            return Err(ConfigError::validation(
                "layer",
                format!(
                    "Number of [[layer]] entries ({}) is larger than layout.layers ({})",
                    layers.len(),
                    layout.layers
                ),
            ));
        }

        // Collect layer names first, actions may refer to layers defined later
        let mut layer_names = HashMap::<String, u8>::new();
        for (layer_number, layer) in layers.iter().enumerate() {
            if let Some(name) = &layer.name {
                if name.parse::<u8>().is_ok() {
                    return Err(ConfigError::validation(
                        format!("layer[{}].name", layer_number),
                        format!("Layer name '{}' must not be a number", name),
                    ));
                }
                if layer_names.insert(name.clone(), layer_number as u8).is_some() {
                    return Err(ConfigError::validation(
                        format!("layer[{}].name", layer_number),
                        format!("Duplicate layer name '{}'", name),
                    ));
                }
            }
        }

        let mut keymap = Vec::with_capacity(layout.layers as usize);
        for (layer_number, layer) in layers.iter().enumerate() {
            let field = match &layer.name {
                Some(name) => format!("layer[{}] ({})", layer_number, name),
                None => format!("layer[{}]", layer_number),
            };
            let actions = keymap_parser(&layer.keys, &aliases, &layer_names, &field)?;
            if actions.len() > sequence_to_grid.len() {
                return Err(ConfigError::validation(
                    field,
                    format!(
                        "{} keys are defined, but the layout has only {} positions",
                        actions.len(),
                        sequence_to_grid.len()
                    ),
                ));
            }
            let mut grid = vec![vec![KeyAction::No; layout.cols as usize]; layout.rows as usize];
            for (action, (row, col)) in actions.into_iter().zip(sequence_to_grid.iter()) {
                if let Some(l) = action.layer() {
                    if l >= layout.layers {
                        return Err(ConfigError::UndefinedLayer {
                            field,
                            layer: l.to_string(),
                        });
                    }
                }
                if layer_number == 0 && action.is_transparent() {
                    return Err(ConfigError::validation(
                        field,
                        format!("Transparent key at ({},{}) on the base layer", row, col),
                    ));
                }
                grid[*row as usize][*col as usize] = action;
            }
            keymap.push(grid);
        }

        if keymap.is_empty() {
            return Err(ConfigError::validation("layer", "At least the base layer must be defined"));
        }
        // Fill the rest with transparent layers
        keymap.resize(
            layout.layers as usize,
            vec![vec![KeyAction::Transparent; layout.cols as usize]; layout.rows as usize],
        );

        let mut names: Vec<Option<String>> = layers.iter().map(|l| l.name.clone()).collect();
        names.resize(layout.layers as usize, None);

        Ok(LayoutConfig {
            rows: layout.rows,
            cols: layout.cols,
            layers: layout.layers,
            layer_names: names,
            keymap,
        })
    }
}

/// Parses and validates a matrix_map string using Pest.
/// Ensures the string contains only valid coordinates and whitespace.
fn parse_matrix_map(matrix_map: &str) -> ConfigResult<Vec<(u8, u8)>> {
    let pairs = ConfigParser::parse(Rule::matrix_map, matrix_map).map_err(|e| {
        ConfigError::validation("layout.matrix_map", format!("Invalid format: {}", e))
    })?;

    let mut coordinates = Vec::new();
    for pair in pairs.flat_map(|p| p.into_inner()) {
        if pair.as_rule() != Rule::coordinate {
            continue;
        }
        let mut coord_parts = pair.into_inner();
        let mut next_number = || -> ConfigResult<u8> {
            let s = coord_parts.next().map(|p| p.as_str()).unwrap_or_default();
            s.parse::<u8>().map_err(|e| {
                ConfigError::validation("layout.matrix_map", format!("Failed to parse '{}': {}", s, e))
            })
        };
        let row = next_number()?;
        let col = next_number()?;
        coordinates.push((row, col));
    }
    Ok(coordinates)
}

/// Replace every `@alias` in `keys` with its definition, until nothing is left to replace
fn alias_resolver(keys: &str, aliases: &HashMap<String, String>, field: &str) -> ConfigResult<String> {
    let mut current_keys = keys.to_string();

    for _ in 0..MAX_ALIAS_RESOLUTION_DEPTH {
        let mut next_keys = String::with_capacity(current_keys.len());
        let mut made_replacement = false;
        let mut last_index = 0;

        while let Some(at_index) = current_keys[last_index..].find('@') {
            let start_index = last_index + at_index;
            next_keys.push_str(&current_keys[last_index..start_index]);

            // An alias is '@' followed by anything but whitespace, otherwise '@' is kept literally
            let end_index = current_keys[start_index + 1..]
                .find(|c: char| c.is_ascii_whitespace())
                .map_or(current_keys.len(), |i| start_index + 1 + i);
            if end_index == start_index + 1 {
                next_keys.push('@');
                last_index = start_index + 1;
                continue;
            }

            let alias_key = &current_keys[start_index + 1..end_index];
            match aliases.get(alias_key) {
                Some(value) => {
                    next_keys.push_str(value);
                    made_replacement = true;
                }
                None => {
                    return Err(ConfigError::UndefinedAlias {
                        field: field.to_string(),
                        alias: alias_key.to_string(),
                    });
                }
            }
            last_index = end_index;
        }
        next_keys.push_str(&current_keys[last_index..]);

        if !made_replacement {
            return Ok(next_keys);
        }
        current_keys = next_keys;
    }

    Err(ConfigError::validation(
        field,
        format!(
            "Alias resolution exceeded maximum depth ({}), potential infinite loop detected in '{}'",
            MAX_ALIAS_RESOLUTION_DEPTH, keys
        ),
    ))
}

/// Parse the `keys` string of a `[[layer]]`
fn keymap_parser(
    layer_keys: &str,
    aliases: &HashMap<String, String>,
    layer_names: &HashMap<String, u8>,
    field: &str,
) -> ConfigResult<Vec<KeyAction>> {
    // Resolve aliases first
    let layer_keys = alias_resolver(layer_keys, aliases, field)?;

    let pairs = ConfigParser::parse(Rule::key_map, &layer_keys).map_err(|e| ConfigError::InvalidKey {
        field: field.to_string(),
        key: layer_keys.trim().to_string(),
        message: format!("Invalid keymap format: {}", e),
    })?;

    pairs
        .flat_map(|p| p.into_inner())
        .filter(|p| p.as_rule() != Rule::EOI)
        .map(|p| parse_key_action(p, layer_names, field))
        .collect()
}

fn parse_key_action(pair: Pair<Rule>, layer_names: &HashMap<String, u8>, field: &str) -> ConfigResult<KeyAction> {
    let key = pair.as_str().to_string();
    let action = match pair.as_rule() {
        Rule::no_action => KeyAction::No,
        Rule::transparent_action => KeyAction::Transparent,
        Rule::simple_keycode => return parse_simple_key(&key, field),
        Rule::shifted_action => {
            let mut inner = pair.into_inner();
            let keycode = next_keycode(&mut inner, &key, field)?;
            KeyAction::Single(Action::KeyWithModifier(keycode, ModifierCombination::LSHIFT))
        }
        Rule::wm_action => {
            let mut inner = pair.into_inner();
            let keycode = next_keycode(&mut inner, &key, field)?;
            let modifiers = inner
                .next()
                .map(|m| parse_modifiers(m, &key, field))
                .transpose()?
                .unwrap_or_default();
            KeyAction::Single(Action::KeyWithModifier(keycode, modifiers))
        }
        Rule::mod_action => {
            let modifiers = pair
                .into_inner()
                .next()
                .map(|m| parse_modifiers(m, &key, field))
                .transpose()?
                .unwrap_or_default();
            KeyAction::Single(Action::Modifier(modifiers))
        }
        Rule::mo_action => KeyAction::Single(Action::LayerOn(layer_name_resolver(pair, layer_names, field)?)),
        Rule::tg_action => KeyAction::Single(Action::LayerToggle(layer_name_resolver(pair, layer_names, field)?)),
        Rule::to_action => KeyAction::Single(Action::LayerToggleOnly(layer_name_resolver(pair, layer_names, field)?)),
        Rule::osl_action => KeyAction::Single(Action::OneShotLayer(layer_name_resolver(pair, layer_names, field)?)),
        Rule::df_action => KeyAction::Single(Action::DefaultLayer(layer_name_resolver(pair, layer_names, field)?)),
        Rule::pdf_action => {
            KeyAction::Single(Action::PersistentDefaultLayer(layer_name_resolver(pair, layer_names, field)?))
        }
        rule => {
            return Err(ConfigError::InvalidKey {
                field: field.to_string(),
                key,
                message: format!("Unexpected rule {:?}", rule),
            });
        }
    };
    Ok(action)
}

/// The layer argument of a layer action, as a layer number
fn layer_name_resolver(pair: Pair<Rule>, layer_names: &HashMap<String, u8>, field: &str) -> ConfigResult<u8> {
    let undefined = |layer: &str| ConfigError::UndefinedLayer {
        field: field.to_string(),
        layer: layer.to_string(),
    };
    let action = pair.as_str();
    let inner_pair = pair.into_inner().next().ok_or_else(|| undefined(action))?;
    let layer = inner_pair.as_str();
    match inner_pair.as_rule() {
        Rule::layer_number => layer.parse::<u8>().map_err(|_| undefined(layer)),
        _ => layer_names.get(layer).copied().ok_or_else(|| undefined(layer)),
    }
}

fn next_keycode(inner: &mut pest::iterators::Pairs<Rule>, key: &str, field: &str) -> ConfigResult<KeyCode> {
    let name = inner.next().map(|p| p.as_str()).unwrap_or_default();
    parse_keycode(name).ok_or_else(|| ConfigError::InvalidKey {
        field: field.to_string(),
        key: key.to_string(),
        message: format!("'{}' is not a keycode", name),
    })
}

fn parse_modifiers(pair: Pair<Rule>, key: &str, field: &str) -> ConfigResult<ModifierCombination> {
    let (mut right, mut gui, mut alt, mut shift, mut ctrl) = (false, false, false, false, false);
    for modifier in pair.into_inner() {
        let name = modifier.as_str();
        // QMK style short names and keycode names are both accepted
        match name.to_ascii_lowercase().as_str() {
            "lctrl" | "lctl" => ctrl = true,
            "lshift" | "lsft" => shift = true,
            "lalt" | "lopt" => alt = true,
            "lgui" | "lcmd" | "lwin" => gui = true,
            "rctrl" | "rctl" => (right, ctrl) = (true, true),
            "rshift" | "rsft" => (right, shift) = (true, true),
            "ralt" | "ropt" | "algr" => (right, alt) = (true, true),
            "rgui" | "rcmd" | "rwin" => (right, gui) = (true, true),
            _ => {
                return Err(ConfigError::InvalidKey {
                    field: field.to_string(),
                    key: key.to_string(),
                    message: format!("'{}' is not a modifier", name),
                });
            }
        }
    }
    Ok(ModifierCombination::new_from(right, gui, alt, shift, ctrl))
}

/// Lowercase `name` and strip the optional `kc_` prefix
fn normalize_key_name(name: &str) -> String {
    let name = name.to_ascii_lowercase();
    match name.strip_prefix("kc_") {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => name,
    }
}

/// Parse a single keycode name, such as `A`, `KC_BSPC` or `BacklightStep`.
///
/// Aliases which stand for an action, like `exlm`, aren't keycodes.
pub fn parse_keycode(name: &str) -> Option<KeyCode> {
    let name = normalize_key_name(name);
    let canonical = KEYCODE_ALIAS.get(name.as_str()).copied().unwrap_or(name.as_str());
    if let Ok(k) = HidKeyCode::from_str(canonical) {
        Some(KeyCode::Hid(k))
    } else if let Ok(k) = SpecialKey::from_str(canonical) {
        Some(KeyCode::Special(k))
    } else if let Ok(k) = ConsumerKey::from_str(canonical) {
        Some(KeyCode::Consumer(k))
    } else if let Ok(k) = SystemControlKey::from_str(canonical) {
        Some(KeyCode::SystemControl(k))
    } else {
        None
    }
}

/// Parse a bare key name into an action
fn parse_simple_key(name: &str, field: &str) -> ConfigResult<KeyAction> {
    let normalized = normalize_key_name(name);
    match normalized.as_str() {
        "no" => return Ok(KeyAction::No),
        "trns" | "transparent" => return Ok(KeyAction::Transparent),
        _ => (),
    }
    match KEYCODE_ALIAS.get(normalized.as_str()).copied() {
        Some("TriLayerLower") => return Ok(KeyAction::Single(Action::TriLayerLower)),
        Some("TriLayerUpper") => return Ok(KeyAction::Single(Action::TriLayerUpper)),
        Some(expr) if expr.contains('(') => {
            let pair = ConfigParser::parse(Rule::single_key, expr)
                .ok()
                .and_then(|mut pairs| pairs.next())
                .and_then(|p| p.into_inner().next())
                .ok_or_else(|| ConfigError::InvalidKey {
                    field: field.to_string(),
                    key: name.to_string(),
                    message: format!("Invalid definition '{}'", expr),
                })?;
            return parse_key_action(pair, &HashMap::new(), field);
        }
        _ => (),
    }
    match normalized.as_str() {
        "trilayerlower" => return Ok(KeyAction::Single(Action::TriLayerLower)),
        "trilayerupper" => return Ok(KeyAction::Single(Action::TriLayerUpper)),
        _ => (),
    }
    parse_keycode(name)
        .map(|k| KeyAction::Single(Action::Key(k)))
        .ok_or_else(|| ConfigError::InvalidKey {
            field: field.to_string(),
            key: name.to_string(),
            message: "Unknown keycode".to_string(),
        })
}
