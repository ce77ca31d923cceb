use super::{error_message, escape_html, layout};
use crate::utils::Flash;

pub fn login_page(error: Option<&str>, flash: Option<Flash>, username: &str) -> String {
    let body = format!(
        "<h2>Log in</h2>{}\
<form method=\"post\" action=\"/login\">\
<label>Username <input name=\"username\" value=\"{}\" required></label>\
<label>Password <input type=\"password\" name=\"password\" required></label>\
<button type=\"submit\">Log in</button></form>\
<p>No account? <a href=\"/register\">Register</a></p>",
        error_message(error),
        escape_html(username)
    );
    layout("Log in", None, flash, &body)
}

pub fn register_page(error: Option<&str>, username: &str) -> String {
    let body = format!(
        "<h2>Create account</h2>{}\
<form method=\"post\" action=\"/register\">\
<label>Username <input name=\"username\" value=\"{}\" maxlength=\"150\" required></label>\
<label>Password <input type=\"password\" name=\"password\" required></label>\
<button type=\"submit\">Register</button></form>\
<p>Already registered? <a href=\"/login\">Log in</a></p>",
        error_message(error),
        escape_html(username)
    );
    layout("Register", None, None, &body)
}
