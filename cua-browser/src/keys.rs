//! Abstract key names used by computer-use agents, mapped to the driver's
//! native key identifiers.

/// Native token for an abstract key name, if the name is in the table.
///
/// Lookup is case-insensitive.
pub fn lookup(key: &str) -> Option<&'static str> {
    let native = match key.to_lowercase().as_str() {
        "/" => "Divide",
        "\\" => "Backslash",
        "alt" => "Alt",
        "arrowdown" => "ArrowDown",
        "arrowleft" => "ArrowLeft",
        "arrowright" => "ArrowRight",
        "arrowup" => "ArrowUp",
        "backspace" => "Backspace",
        "capslock" => "CapsLock",
        "cmd" => "Meta",
        "ctrl" => "Control",
        "delete" => "Delete",
        "end" => "End",
        "enter" => "Enter",
        "esc" => "Escape",
        "home" => "Home",
        "insert" => "Insert",
        "option" => "Alt",
        "pagedown" => "PageDown",
        "pageup" => "PageUp",
        "shift" => "Shift",
        "space" => " ",
        "super" => "Meta",
        "tab" => "Tab",
        "win" => "Meta",
        _ => return None,
    };
    Some(native)
}

/// Map an abstract key name to a native token. Unmapped names pass through
/// unchanged.
pub fn map_key(key: &str) -> String {
    lookup(key).map(str::to_string).unwrap_or_else(|| key.to_string())
}

/// Map a key sequence, preserving order.
pub fn map_keys<S: AsRef<str>>(keys: &[S]) -> Vec<String> {
    keys.iter().map(|k| map_key(k.as_ref())).collect()
}
