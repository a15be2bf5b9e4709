use crate::router::respond;
use crate::tests::utils::{body_string, get, test_state, upload_request, HEADER};

#[test]
fn log_is_not_found_before_any_import() {
    let (_dir, state) = test_state();
    let resp = respond(get("/downloadlogs"), &state);
    assert_eq!(resp.status(), 404);
}

#[test]
fn log_downloads_as_attachment_after_import() {
    let (_dir, state) = test_state();
    respond(
        upload_request("cities.csv", format!("{HEADER}Oslo,,47,59.9139,10.7522,NO\n")),
        &state,
    );

    let mut resp = respond(get("/downloadlogs"), &state);

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Disposition").unwrap(),
        "attachment; filename=\"log.txt\""
    );
    let body = body_string(&mut resp);
    assert!(body.contains("Oslo"));
    assert!(body.contains("entered into DB successfully"));
}

#[test]
fn template_download_is_the_header_row() {
    let (_dir, state) = test_state();

    let mut resp = respond(get("/downloadtemplate"), &state);

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Disposition").unwrap(),
        "attachment; filename=\"uploadtemplate.csv\""
    );
    assert!(resp
        .headers()
        .get("Content-Type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert_eq!(body_string(&mut resp), HEADER);
}

#[test]
fn responses_are_not_cacheable() {
    let (_dir, state) = test_state();

    for uri in ["/health", "/downloadtemplate", "/downloadlogs", "/nope"] {
        let resp = respond(get(uri), &state);
        assert_eq!(
            resp.headers().get("Cache-Control").unwrap(),
            "no-cache, no-store, must-revalidate",
            "{uri}"
        );
        assert_eq!(resp.headers().get("Pragma").unwrap(), "no-cache");
        assert_eq!(resp.headers().get("Expires").unwrap(), "0");
    }
}

#[test]
fn health_and_unknown_routes() {
    let (_dir, state) = test_state();

    let mut resp = respond(get("/health"), &state);
    assert_eq!(resp.status(), 200);
    assert_eq!(body_string(&mut resp), "ok");

    assert_eq!(respond(get("/missing"), &state).status(), 404);
}

#[test]
fn handle_surfaces_errors_before_rendering() {
    let (_dir, state) = test_state();
    let result = crate::router::handle(get("/downloadlogs"), &state);
    assert!(matches!(result, Err(crate::errors::ServerError::NotFound)));
}
