//! HTML for the task list page.
//!
//! The page works as plain HTML forms; `/static/app.js` layers fetch-based
//! add/toggle/delete plus the undo and clear buttons on top.

use crate::model::task::Task;
use crate::undo::{ActionKind, LastAction};

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn render_item(task: &Task) -> String {
    let id = escape_html(&task.id);
    let (class, toggle_to, toggle_label) = if task.done {
        (" class=\"done\"", "false", "Undo")
    } else {
        ("", "true", "Done")
    };
    format!(
        r#"      <li{class} data-id="{id}">
        <span class="task-text">{text}</span>
        <form method="post" action="/update/{id}" class="toggle-form">
          <input type="hidden" name="done" value="{toggle_to}">
          <button type="submit" class="toggle-btn">{toggle_label}</button>
        </form>
        <form method="post" action="/delete/{id}" class="delete-form">
          <button type="submit" class="delete-btn" data-id="{id}">Delete</button>
        </form>
      </li>
"#,
        text = escape_html(&task.description),
    )
}

fn undo_hint(last: &LastAction) -> &'static str {
    match last.kind {
        ActionKind::None => "Nothing to undo",
        ActionKind::Add => "Undo add",
        ActionKind::Update => "Undo update",
        ActionKind::Delete => "Undo delete",
        ActionKind::Clear => "Undo clear",
    }
}

/// Render the full page for `GET /`.
pub fn render_page(tasks: &[Task], last: &LastAction) -> String {
    let items: String = tasks.iter().map(render_item).collect();
    let remaining = tasks.iter().filter(|t| !t.done).count();
    let undo_disabled = if last.kind == ActionKind::None {
        " disabled"
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Todo App</title>
  <style>
    body {{ font-family: system-ui, sans-serif; max-width: 36rem; margin: 2rem auto; padding: 0 1rem; }}
    body.dark-mode {{ background: #111827; color: #e5e7eb; }}
    ul {{ list-style: none; padding: 0; }}
    li {{ display: flex; gap: .5rem; align-items: center; padding: .4rem 0; border-bottom: 1px solid #8884; }}
    li .task-text {{ flex: 1; }}
    li.done .task-text {{ text-decoration: line-through; opacity: .6; }}
    li form {{ margin: 0; }}
    .toolbar {{ display: flex; gap: .5rem; margin-top: 1rem; }}
  </style>
</head>
<body>
  <header>
    <h1>Todo App</h1>
    <button id="dark-mode-toggle" type="button">Dark</button>
  </header>
  <form id="todo-form" method="post" action="/add">
    <input id="todo-input" name="task" placeholder="What needs doing?" autocomplete="off" required>
    <button type="submit">Add</button>
  </form>
  <ul id="todo-list">
{items}  </ul>
  <p id="todo-count">{remaining} of {total} remaining</p>
  <div class="toolbar">
    <button id="undo-btn" type="button" title="{hint}"{undo_disabled}>Undo</button>
    <button id="clear-btn" type="button">Clear all</button>
  </div>
  <script src="/static/app.js"></script>
</body>
</html>
"#,
        total = tasks.len(),
        hint = undo_hint(last),
    )
}
