/// Routes advertised on the landing page.
pub const ROUTES: &[&str] = &[
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/<start>",
    "/api/v1.0/<start>/<end>",
];

/// Plain-text listing of the available routes (GET /)
pub async fn index_handler() -> String {
    let mut page = String::from("Welcome to the Hawaii Weather API!\nAvailable Routes:\n");
    for route in ROUTES {
        page.push_str(route);
        page.push('\n');
    }
    page.push_str("Dates are YYYY-MM-DD; both bounds are inclusive.\n");
    page.push_str("API docs: /docs\n");
    page
}
