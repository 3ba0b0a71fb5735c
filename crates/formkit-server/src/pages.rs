//! Full HTML pages around rendered form fragments.

use std::path::Path;

use formkit_core::render::escape_html;

const STYLE: &str = r"
fieldset { margin: 20px; padding: 20px; border: 1px solid #ddd; border-radius: 5px; }
legend { font-weight: bold; padding: 0 10px; }
input, select { margin-left: 10px; padding: 5px; }
div { margin: 10px 0; }
.hint { font-size: 0.8em; color: #666; margin-left: 6px; }
.list-rows { margin: 0 0 0 10px; }
.list-row { margin: 4px 0; }
.list-row button, .add-row { margin-left: 6px; }
";

// Keeps list row names dense: after any add or remove, the rows of a list
// are renamed `<path>.0 .. <path>.n-1` in document order.
const LIST_SCRIPT: &str = r#"
function renumber(field) {
  const path = field.dataset.path;
  field.querySelectorAll('.list-row input').forEach(function (input, index) {
    input.name = path + '.' + index;
  });
}
document.addEventListener('click', function (event) {
  const target = event.target;
  if (target.classList.contains('add-row')) {
    const field = target.closest('.list-field');
    const row = document.createElement('div');
    row.className = 'list-row';
    row.innerHTML = '<input type="text" value=""><button type="button" class="remove-row">&minus;</button>';
    field.querySelector('.list-rows').appendChild(row);
    renumber(field);
  } else if (target.classList.contains('remove-row')) {
    const field = target.closest('.list-field');
    target.closest('.list-row').remove();
    renumber(field);
  }
});
"#;

/// The form page: `fragment` inside a form posting to `/submit`.
#[must_use]
pub fn form_page(title: &str, fragment: &str) -> String {
    let title = escape_html(title);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<h1>{title}</h1>
<form method="POST" action="/submit">
{fragment}
<div style="margin: 20px;"><input type="submit" value="Submit" style="padding: 10px 20px;"></div>
</form>
<script>{LIST_SCRIPT}</script>
</body>
</html>
"#
    )
}

/// Shown after a submission was written.
#[must_use]
pub fn confirmation_page(output_path: &Path) -> String {
    let file = output_path
        .file_name()
        .map_or_else(|| output_path.display().to_string(), |name| name.to_string_lossy().into_owned());
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Form Submitted</title>
<style>body {{ padding: 20px; font-family: Arial, sans-serif; }} a {{ color: #0066cc; text-decoration: none; }}</style>
</head>
<body>
<h1>Form Submitted Successfully</h1>
<p>Check {file} for the results</p>
<a href="/">&larr; Back to form</a>
</body>
</html>
"#,
        file = escape_html(&file),
    )
}

/// Minimal page for error statuses.
#[must_use]
pub fn error_page(status: u16, message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{status}</title></head>\
         <body><h1>{status}</h1><p>{message}</p><a href=\"/\">&larr; Back to form</a></body></html>\n",
        message = escape_html(message),
    )
}
