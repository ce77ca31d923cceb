use super::{escape_html, layout};
use crate::models::{CurrentAccount, Driver, Load, LoadStatus};

pub fn driver_form_page(account: &CurrentAccount, driver: Option<&Driver>) -> String {
    let (title, action) = match driver {
        Some(d) => ("Edit driver", format!("/edit_driver/{}", d.id)),
        None => ("Add driver", "/add_driver".to_string()),
    };

    let body = format!(
        "<h2>{}</h2><form method=\"post\" action=\"{}\">\
<label>Name <input name=\"name\" value=\"{}\" maxlength=\"100\" required></label>\
<label>Truck number <input name=\"truck_number\" value=\"{}\" maxlength=\"50\" required></label>\
<label>Phone <input name=\"phone\" value=\"{}\" maxlength=\"20\"></label>\
<button type=\"submit\">Save</button></form>",
        title,
        action,
        driver.map(|d| escape_html(&d.name)).unwrap_or_default(),
        driver.map(|d| escape_html(&d.truck_number)).unwrap_or_default(),
        driver.map(|d| escape_html(&d.phone)).unwrap_or_default(),
    );
    layout(title, Some(&account.username), None, &body)
}

pub fn load_form_page(account: &CurrentAccount, load: Option<&Load>, drivers: &[Driver]) -> String {
    let (title, action) = match load {
        Some(l) => (format!("Edit load {}", l.load_ref), format!("/edit_load/{}", l.id)),
        None => ("Add load".to_string(), "/add_load".to_string()),
    };
    let rate = load.map(|l| format!("{:.2}", l.rate)).unwrap_or_default();

    let current_status = load.map(|l| l.status).unwrap_or_default();
    let mut status_options = String::new();
    for status in LoadStatus::ALL {
        let selected = if status == current_status { " selected" } else { "" };
        status_options.push_str(&format!("<option value=\"{0}\"{1}>{0}</option>", status, selected));
    }

    let current_driver = load.and_then(|l| l.driver_id);
    let mut driver_options = String::from("<option value=\"\">Unassigned</option>");
    for driver in drivers {
        let selected = if Some(driver.id) == current_driver { " selected" } else { "" };
        driver_options.push_str(&format!(
            "<option value=\"{}\"{}>{} ({})</option>",
            driver.id,
            selected,
            escape_html(&driver.name),
            escape_html(&driver.truck_number)
        ));
    }

    let body = format!(
        "<h2>{}</h2><form method=\"post\" action=\"{}\">\
<label>Pickup <input name=\"pickup\" value=\"{}\" maxlength=\"100\" required></label>\
<label>Drop <input name=\"drop\" value=\"{}\" maxlength=\"100\" required></label>\
<label>Date <input name=\"date\" value=\"{}\" maxlength=\"20\"></label>\
<label>Rate <input name=\"rate\" type=\"number\" step=\"0.01\" min=\"0\" value=\"{}\"></label>\
<label>Status <select name=\"status\">{}</select></label>\
<label>Driver <select name=\"driver_id\">{}</select></label>\
<button type=\"submit\">Save</button></form>",
        escape_html(&title),
        action,
        load.map(|l| escape_html(&l.pickup)).unwrap_or_default(),
        load.map(|l| escape_html(&l.drop)).unwrap_or_default(),
        load.map(|l| escape_html(&l.date)).unwrap_or_default(),
        rate,
        status_options,
        driver_options,
    );
    layout(&title, Some(&account.username), None, &body)
}
