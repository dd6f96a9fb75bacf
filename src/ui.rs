use crate::heatmap::Heatmap;
use crate::models::ScoreForm;
use html_escape::{encode_double_quoted_attribute, encode_text};

pub struct DashboardView<'a> {
    pub username: &'a str,
    pub form: &'a ScoreForm,
    pub error: Option<&'a str>,
    pub heatmap: &'a Heatmap,
}

pub fn render_login(username: &str, error: Option<&str>) -> String {
    render_auth_page(AuthPage {
        title: "Login",
        action: "/login",
        button: "Login",
        footer: r#"Don't have an account? <a href="/signup">Sign up</a>"#,
        username,
        error,
    })
}

pub fn render_signup(username: &str, error: Option<&str>) -> String {
    render_auth_page(AuthPage {
        title: "Sign Up",
        action: "/signup",
        button: "Sign Up",
        footer: r#"Already have an account? <a href="/login">Login</a>"#,
        username,
        error,
    })
}

pub fn render_loading() -> String {
    layout("Loading", r#"<meta http-equiv="refresh" content="1" />"#, LOADING_BODY)
}

pub fn render_dashboard(view: &DashboardView<'_>) -> String {
    let body = DASHBOARD_BODY
        .replace("{{COLUMNS}}", &view.heatmap.columns.to_string())
        .replace("{{CELLS}}", &render_cells(view.heatmap))
        .replace("{{USERNAME}}", &encode_text(view.username))
        .replace("{{DATE}}", &encode_double_quoted_attribute(&view.form.date))
        .replace("{{SCORE}}", &encode_double_quoted_attribute(&view.form.score))
        .replace("{{ERROR}}", &error_block(view.error));
    layout("Dashboard", "", &body)
}

struct AuthPage<'a> {
    title: &'a str,
    action: &'a str,
    button: &'a str,
    footer: &'a str,
    username: &'a str,
    error: Option<&'a str>,
}

fn render_auth_page(page: AuthPage<'_>) -> String {
    let body = AUTH_BODY
        .replace("{{TITLE}}", page.title)
        .replace("{{ACTION}}", page.action)
        .replace("{{BUTTON}}", page.button)
        .replace("{{FOOTER}}", page.footer)
        .replace("{{USERNAME}}", &encode_double_quoted_attribute(page.username))
        .replace("{{ERROR}}", &error_block(page.error));
    layout(page.title, "", &body)
}

fn render_cells(heatmap: &Heatmap) -> String {
    let mut out = String::with_capacity(heatmap.cells.len() * 96);
    for cell in &heatmap.cells {
        out.push_str(&format!(
            r#"<div class="cell" style="background-color: {}" title="{}" data-date="{}" data-score="{}"></div>"#,
            cell.color.css(),
            cell.title(),
            cell.date,
            cell.score,
        ));
        out.push('\n');
    }
    out
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|message| format!(r#"<p class="error">{}</p>"#, encode_text(message)))
        .unwrap_or_default()
}

fn layout(title: &str, head: &str, body: &str) -> String {
    LAYOUT_HTML
        .replace("{{TITLE}}", title)
        .replace("{{HEAD}}", head)
        .replace("{{BODY}}", body)
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  {{HEAD}}
  <title>{{TITLE}} · Daily Score</title>
  <style>
    :root {
      --bg: #f6f8fa;
      --ink: #24292f;
      --muted: #57606a;
      --accent: #2da44e;
      --danger: #cf222e;
      --card: white;
      --shadow: 0 16px 40px rgba(36, 41, 47, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1, h2 {
      margin: 0;
    }

    form {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: end;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.9rem;
      color: var(--muted);
    }

    input {
      padding: 8px 10px;
      border: 1px solid #d0d7de;
      border-radius: 8px;
      font-size: 1rem;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button.secondary {
      background: #6e7781;
    }

    .error {
      color: var(--danger);
      margin: 0;
    }

    .topbar {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 16px;
    }

    .heatmap {
      display: grid;
      gap: 1px;
    }

    .cell {
      width: 10px;
      height: 10px;
    }
  </style>
</head>
<body>
  <main class="app">
{{BODY}}
  </main>
</body>
</html>
"#;

const AUTH_BODY: &str = r#"    <h2>{{TITLE}}</h2>
    {{ERROR}}
    <form method="post" action="{{ACTION}}">
      <label for="username">Username:
        <input type="text" id="username" name="username" value="{{USERNAME}}" required />
      </label>
      <label for="password">Password:
        <input type="password" id="password" name="password" required />
      </label>
      <button type="submit">{{BUTTON}}</button>
    </form>
    <p>{{FOOTER}}</p>"#;

const LOADING_BODY: &str = r#"    <p>Loading...</p>"#;

const DASHBOARD_BODY: &str = r#"    <div class="topbar">
      <h1>Welcome, {{USERNAME}}!</h1>
      <form method="post" action="/logout">
        <button type="submit" class="secondary">Logout</button>
      </form>
    </div>

    <section>
      <h2>Submit Today's Score</h2>
      {{ERROR}}
      <form method="post" action="/scores">
        <input type="date" name="date" value="{{DATE}}" required />
        <input type="number" name="score" value="{{SCORE}}" min="1" max="10" required />
        <button type="submit">Submit Score</button>
      </form>
    </section>

    <section>
      <h2>Your Productivity Heatmap</h2>
      <div class="heatmap" style="grid-template-columns: repeat({{COLUMNS}}, 1fr)">
{{CELLS}}      </div>
    </section>"#;
