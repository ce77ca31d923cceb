use super::{escape_html, layout};
use crate::models::{CurrentAccount, Driver, LoadFilter, LoadStatus, LoadSummary, LoadWithDriver};
use crate::utils::Flash;

pub struct DashboardView<'a> {
    pub account: &'a CurrentAccount,
    pub loads: &'a [LoadWithDriver],
    pub drivers: &'a [Driver],
    pub summary: &'a LoadSummary,
    pub filter: &'a LoadFilter,
    pub flash: Option<Flash>,
}

pub fn dashboard_page(view: &DashboardView<'_>) -> String {
    let mut body = String::new();

    let summary = view.summary;
    body.push_str(&format!(
        "<section class=\"stats\"><div>Active loads: <strong id=\"active-loads\">{}</strong></div>\
<div>Total revenue: <strong id=\"total-revenue\">${:.2}</strong></div>",
        summary.active(),
        summary.total_revenue
    ));
    for (status, count) in summary.status_counts() {
        body.push_str(&format!("<div>{}: <strong>{}</strong></div>", status, count));
    }
    body.push_str("</section>");

    let mut options = String::new();
    for label in std::iter::once("All").chain(LoadStatus::ALL.iter().map(|s| s.as_str())) {
        let selected = if label == view.filter.status_label() { " selected" } else { "" };
        options.push_str(&format!("<option value=\"{0}\"{1}>{0}</option>", label, selected));
    }
    body.push_str(&format!(
        "<form method=\"get\" action=\"/dashboard\"><select name=\"status\">{}</select>\
<input name=\"search\" placeholder=\"Search pickup, drop or ref\" value=\"{}\">\
<button type=\"submit\">Filter</button></form>",
        options,
        escape_html(view.filter.search.as_deref().unwrap_or(""))
    ));

    body.push_str(
        "<h2>Loads</h2><table><thead><tr><th>Ref</th><th>Pickup</th><th>Drop</th><th>Date</th>\
<th>Rate</th><th>Status</th><th>Driver</th><th></th></tr></thead><tbody>",
    );
    if view.loads.is_empty() {
        body.push_str("<tr><td colspan=\"8\">No loads found.</td></tr>");
    }
    for row in view.loads {
        let load = &row.load;
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>${:.2}</td><td>{}</td><td>{}</td>\
<td><a href=\"/edit_load/{}\">Edit</a> <a href=\"/delete_load/{}\">Delete</a></td></tr>",
            escape_html(&load.load_ref),
            escape_html(&load.pickup),
            escape_html(&load.drop),
            escape_html(&load.date),
            load.rate,
            load.status,
            escape_html(row.driver_label()),
            load.id,
            load.id
        ));
    }
    body.push_str("</tbody></table>");

    body.push_str(
        "<h2>Drivers</h2><table><thead><tr><th>Name</th><th>Truck</th><th>Phone</th>\
<th>Status</th><th></th></tr></thead><tbody>",
    );
    if view.drivers.is_empty() {
        body.push_str("<tr><td colspan=\"5\">No drivers yet.</td></tr>");
    }
    for driver in view.drivers {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
<td><a href=\"/edit_driver/{}\">Edit</a> <a href=\"/delete_driver/{}\">Delete</a></td></tr>",
            escape_html(&driver.name),
            escape_html(&driver.truck_number),
            escape_html(&driver.phone),
            driver.status,
            driver.id,
            driver.id
        ));
    }
    body.push_str("</tbody></table>");

    layout("Dashboard", Some(&view.account.username), view.flash, &body)
}
