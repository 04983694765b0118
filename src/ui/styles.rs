use crate::domain::column_type::CellKind;

pub const MODAL_BACKDROP_STYLE: &str = "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 1100;";
pub const MODAL_BODY_STYLE: &str = "background: #fff; padding: 16px; border: 1px solid #999; min-width: 360px; max-width: 720px; max-height: 80vh; overflow: auto;";
pub const MODAL_TITLE_STYLE: &str = "margin-bottom: 8px; font-weight: 600;";
pub const MODAL_FOOTER_STYLE: &str = "display: flex; justify-content: flex-end; gap: 8px; margin-top: 12px;";

pub fn root_container_style() -> &'static str {
    "font-family: 'Noto Sans', sans-serif; padding: 12px; background: #fff; height: 100vh; box-sizing: border-box; display: flex; flex-direction: column; overflow: hidden;"
}

pub fn toolbar_style() -> &'static str {
    "display: flex; gap: 8px; align-items: center; flex-wrap: wrap; margin-bottom: 8px; padding: 8px 0;"
}

pub fn table_container_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; border: 1px solid #ddd;"
}

pub fn table_header_cell_style(is_new_column: bool) -> String {
    format!(
        "position: sticky; top: 0; z-index: 10; border: 1px solid #bbb; padding: 4px 6px; text-align: left; white-space: nowrap; background: {};",
        if is_new_column { "#dbeafe" } else { "#f3f4f6" }
    )
}

pub fn cell_style(kind: CellKind, is_dirty: bool, is_new_column: bool) -> String {
    let background = if is_dirty {
        "background: #ecfdf5;"
    } else if is_new_column {
        "background: #eff6ff;"
    } else {
        ""
    };
    let text = match kind {
        CellKind::Number => "font-family: monospace; color: #2563eb; text-align: right;",
        CellKind::Boolean => "text-align: center;",
        CellKind::Text => "text-align: left;",
    };
    format!("border: 1px solid #ddd; padding: 4px 6px; max-width: 320px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; cursor: pointer; {background} {text}")
}

pub fn boolean_badge_style(value: bool) -> &'static str {
    if value {
        "display: inline-block; padding: 0 4px; font-size: 10px; border-radius: 4px; color: #fff; background: #16a34a;"
    } else {
        "display: inline-block; padding: 0 4px; font-size: 10px; border-radius: 4px; color: #111; background: #e5e7eb;"
    }
}

pub fn row_style(is_selected: bool) -> &'static str {
    if is_selected {
        "background: #eef4ff;"
    } else {
        ""
    }
}
