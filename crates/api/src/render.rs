//! Server-rendered HTML pages.
//!
//! Every piece of user-supplied text goes through [`escape_html`] before it
//! is interpolated.

use patient_register_core::flash::Flash;
use patient_register_core::patient::{MAX_AGE, MIN_AGE, NAME_MAX_LEN, PROBLEM_MAX_LEN};
use patient_register_db::models::patient::Patient;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem;color:#1f2933}\
h1{font-size:1.6rem}\
form.add{display:grid;grid-template-columns:repeat(2,1fr);gap:.75rem;margin-bottom:2rem}\
form.add label{display:flex;flex-direction:column;font-size:.9rem}\
form.add .wide{grid-column:span 2}\
input,select,textarea{padding:.4rem;font:inherit}\
.flash{padding:.6rem 1rem;border-radius:4px;margin:.5rem 0}\
.flash.success{background:#e3f9e5;color:#05400a}\
.flash.error{background:#ffe3e3;color:#610404}\
table{width:100%;border-collapse:collapse}\
th,td{text-align:left;padding:.5rem;border-bottom:1px solid #d9e2ec}\
td form{margin:0}\
.empty{color:#7b8794}";

/// Escape text for safe inclusion in HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// The listing page: pending messages, the add form, and every record in
/// the order given.
pub fn render_index(patients: &[Patient], flashes: &[Flash]) -> String {
    let mut body = String::new();

    body.push_str("<h1>Hospital Patient Register</h1>\n");
    push_flashes(&mut body, flashes);
    push_form(&mut body);

    body.push_str(&format!("<h2>Patients ({})</h2>\n", patients.len()));
    if patients.is_empty() {
        body.push_str("<p class=\"empty\">No patients recorded yet.</p>\n");
    } else {
        push_table(&mut body, patients);
    }

    page("Hospital Patient Register", &body)
}

/// Generic failure page shown when a request could not be completed.
pub fn render_error_page(message: &str) -> String {
    let body = format!(
        "<h1>Something went wrong</h1>\n\
         <div class=\"flash error\">{}</div>\n\
         <p><a href=\"/\">Back to the patient list</a></p>\n",
        escape_html(message)
    );
    page("Error", &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n\
         <style>{STYLE}</style>\n\
         </head>\n\
         <body>\n{body}</body>\n\
         </html>\n",
        escape_html(title)
    )
}

fn push_flashes(out: &mut String, flashes: &[Flash]) {
    for flash in flashes {
        out.push_str(&format!(
            "<div class=\"flash {}\">{}</div>\n",
            flash.level.as_str(),
            escape_html(&flash.message)
        ));
    }
}

fn push_form(out: &mut String) {
    out.push_str(&format!(
        "<form class=\"add\" method=\"post\" action=\"/\">\n\
         <label>Name<input name=\"name\" required maxlength=\"{NAME_MAX_LEN}\"></label>\n\
         <label>Age<input name=\"age\" type=\"number\" required min=\"{MIN_AGE}\" max=\"{MAX_AGE}\"></label>\n\
         <label>Gender<select name=\"gender\">\n\
         <option value=\"\">—</option>\n\
         <option>Male</option>\n\
         <option>Female</option>\n\
         <option>Other</option>\n\
         </select></label>\n\
         <label class=\"wide\">Health issue<textarea name=\"problem\" required maxlength=\"{PROBLEM_MAX_LEN}\" rows=\"3\"></textarea></label>\n\
         <button class=\"wide\" type=\"submit\">Add patient</button>\n\
         </form>\n"
    ));
}

fn push_table(out: &mut String, patients: &[Patient]) {
    out.push_str(
        "<table>\n<thead><tr><th>ID</th><th>Name</th><th>Age</th><th>Gender</th>\
         <th>Health issue</th><th>Added</th><th></th></tr></thead>\n<tbody>\n",
    );
    for p in patients {
        out.push_str(&format!(
            "<tr><td>{id}</td><td>{name}</td><td>{age}</td><td>{gender}</td><td>{problem}</td>\
             <td>{added}</td>\
             <td><form method=\"post\" action=\"/delete/{id}\">\
             <button type=\"submit\">Delete</button></form></td></tr>\n",
            id = p.id,
            name = escape_html(&p.name),
            age = p.age,
            gender = escape_html(&p.gender),
            problem = escape_html(&p.problem),
            added = p.created_at.format("%Y-%m-%d %H:%M"),
        ));
    }
    out.push_str("</tbody>\n</table>\n");
}
