//! Project selection cookies.
//!
//! Unrelated to the cart itself: the storefront needs a selected project
//! before it shows prices. Both cookies must be present and usable.

use serde::Serialize;

pub const PROJECT_ID_COOKIE: &str = "project_id";
pub const PROJECT_NAME_COOKIE: &str = "project_name";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProjectCheck {
    Selected { id: i64, name: String },
    /// The host should open its project picker.
    SelectionRequired,
}

/// Inspect a `Cookie` header (`a=1; b=2`).
///
/// A zero, missing or non-numeric id, or an empty name, requires selection.
pub fn check_project(cookie_header: &str) -> ProjectCheck {
    let id = cookie_value(cookie_header, PROJECT_ID_COOKIE)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|&id| id != 0);
    let name = cookie_value(cookie_header, PROJECT_NAME_COOKIE).filter(|v| !v.is_empty());

    match (id, name) {
        (Some(id), Some(name)) => ProjectCheck::Selected {
            id,
            name: name.to_string(),
        },
        _ => ProjectCheck::SelectionRequired,
    }
}

/// Cookie assignments that clear the selection.
pub fn reset_cookies() -> [String; 2] {
    [
        format!("{PROJECT_ID_COOKIE}=;"),
        format!("{PROJECT_NAME_COOKIE}=;"),
    ]
}

fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').map(str::trim).find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == name).then_some(v)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_cookies_select_project() {
        assert_eq!(
            check_project("theme=dark; project_id=12; project_name=Warehouse"),
            ProjectCheck::Selected {
                id: 12,
                name: "Warehouse".to_string()
            }
        );
    }

    #[test]
    fn missing_or_cleared_cookies_require_selection() {
        assert_eq!(check_project(""), ProjectCheck::SelectionRequired);
        assert_eq!(
            check_project("project_id=12"),
            ProjectCheck::SelectionRequired
        );
        assert_eq!(
            check_project("project_id=; project_name="),
            ProjectCheck::SelectionRequired
        );
        assert_eq!(
            check_project("project_id=0; project_name=X"),
            ProjectCheck::SelectionRequired
        );
        assert_eq!(
            check_project("project_id=abc; project_name=X"),
            ProjectCheck::SelectionRequired
        );
    }

    #[test]
    fn similar_names_do_not_match() {
        assert_eq!(
            check_project("old_project_id=3; project_name=X"),
            ProjectCheck::SelectionRequired
        );
    }

    #[test]
    fn reset_clears_both() {
        assert_eq!(reset_cookies(), ["project_id=;".to_string(), "project_name=;".to_string()]);
    }
}
