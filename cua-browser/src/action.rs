//! The action descriptor accepted by the `browser` tool.
//!
//! Callers send a loosely-typed JSON object discriminated by `"type"`; it is
//! parsed once into [`Action`], which carries only the fields its kind uses.

use cua_core::{CuaError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Pointer button. Anything other than `right` or `middle` is `left`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn normalize(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("right") => MouseButton::Right,
            Some("middle") => MouseButton::Middle,
            _ => MouseButton::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Right => "right",
            MouseButton::Middle => "middle",
        }
    }
}

impl<'de> Deserialize<'de> for MouseButton {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(MouseButton::normalize(value.as_str()))
    }
}

/// Integer viewport coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PointRepr")]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

/// Drag paths arrive either as `[x, y]` pairs or as `{x, y}` objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum PointRepr {
    Pair(i64, i64),
    Object { x: i64, y: i64 },
}

impl From<PointRepr> for Point {
    fn from(repr: PointRepr) -> Self {
        match repr {
            PointRepr::Pair(x, y) | PointRepr::Object { x, y } => Point { x, y },
        }
    }
}

/// One browser interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Click {
        x: i64,
        y: i64,
        #[serde(default, deserialize_with = "null_as_default")]
        button: MouseButton,
    },
    DoubleClick {
        x: i64,
        y: i64,
    },
    Drag {
        #[serde(default, deserialize_with = "null_as_default")]
        path: Vec<Point>,
    },
    Keypress {
        keys: Vec<String>,
    },
    Move {
        x: i64,
        y: i64,
    },
    Screenshot {},
    Scroll {
        x: i64,
        y: i64,
        #[serde(default, deserialize_with = "null_as_default")]
        scroll_x: i64,
        #[serde(default, deserialize_with = "null_as_default")]
        scroll_y: i64,
    },
    Type {
        text: String,
    },
    Wait {
        #[serde(default)]
        duration_ms: Option<u64>,
    },
}

impl Action {
    /// Parse a descriptor. Unknown kinds and missing required fields are
    /// rejected; unknown extra fields are ignored.
    pub fn from_args(args: &Value) -> Result<Self> {
        if !args.is_object() {
            return Err(CuaError::InvalidArgument(format!(
                "action must be a JSON object, got {args}"
            )));
        }
        serde_json::from_value(args.clone())
            .map_err(|e| CuaError::InvalidArgument(format!("invalid browser action: {e}")))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Action::Click { .. } => "click",
            Action::DoubleClick { .. } => "double_click",
            Action::Drag { .. } => "drag",
            Action::Keypress { .. } => "keypress",
            Action::Move { .. } => "move",
            Action::Screenshot {} => "screenshot",
            Action::Scroll { .. } => "scroll",
            Action::Type { .. } => "type",
            Action::Wait { .. } => "wait",
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_click_defaults_button() {
        let action = Action::from_args(&json!({"type": "click", "x": 10, "y": 20})).unwrap();
        assert_eq!(action, Action::Click { x: 10, y: 20, button: MouseButton::Left });
    }

    #[test]
    fn test_button_normalization() {
        let parse = |button: Value| {
            match Action::from_args(&json!({"type": "click", "x": 1, "y": 2, "button": button}))
                .unwrap()
            {
                Action::Click { button, .. } => button,
                other => panic!("unexpected action {other:?}"),
            }
        };
        assert_eq!(parse(json!("middle")), MouseButton::Middle);
        assert_eq!(parse(json!("right")), MouseButton::Right);
        assert_eq!(parse(json!("Right")), MouseButton::Right);
        assert_eq!(parse(json!("invalid")), MouseButton::Left);
        assert_eq!(parse(json!("back")), MouseButton::Left);
        assert_eq!(parse(Value::Null), MouseButton::Left);
        assert_eq!(parse(json!(3)), MouseButton::Left);
    }

    #[test]
    fn test_drag_path_forms() {
        let pairs = Action::from_args(&json!({"type": "drag", "path": [[10, 10], [50, 50]]}))
            .unwrap();
        let objects = Action::from_args(
            &json!({"type": "drag", "path": [{"x": 10, "y": 10}, {"x": 50, "y": 50}]}),
        )
        .unwrap();
        assert_eq!(pairs, objects);
        assert_eq!(
            pairs,
            Action::Drag { path: vec![Point::new(10, 10), Point::new(50, 50)] }
        );
    }

    #[test]
    fn test_drag_without_path_is_empty() {
        let absent = Action::from_args(&json!({"type": "drag"})).unwrap();
        let null = Action::from_args(&json!({"type": "drag", "path": null})).unwrap();
        assert_eq!(absent, Action::Drag { path: vec![] });
        assert_eq!(null, Action::Drag { path: vec![] });
    }

    #[test]
    fn test_scroll_deltas_default_to_zero() {
        let action =
            Action::from_args(&json!({"type": "scroll", "x": 5, "y": 6, "scroll_y": null}))
                .unwrap();
        assert_eq!(action, Action::Scroll { x: 5, y: 6, scroll_x: 0, scroll_y: 0 });
    }

    #[test]
    fn test_extra_fields_ignored() {
        let action = Action::from_args(&json!({
            "type": "screenshot",
            "x": null,
            "text": "ignored"
        }))
        .unwrap();
        assert_eq!(action, Action::Screenshot {});
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = Action::from_args(&json!({"type": "hover", "x": 1, "y": 1})).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("hover"));
    }

    #[test]
    fn test_missing_fields_rejected() {
        for args in [
            json!({"x": 1, "y": 2}),
            json!({"type": "click", "x": 1}),
            json!({"type": "type"}),
            json!({"type": "keypress"}),
            json!("click"),
        ] {
            let err = Action::from_args(&args).unwrap_err();
            assert!(err.is_invalid_argument(), "expected rejection for {args}");
        }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Action::Wait { duration_ms: None }.kind(), "wait");
        assert_eq!(Action::DoubleClick { x: 0, y: 0 }.kind(), "double_click");
        assert_eq!(Action::Keypress { keys: vec![] }.kind(), "keypress");
    }
}
