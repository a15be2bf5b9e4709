use crate::db::cities::count_cities;
use crate::router::respond;
use crate::tests::utils::{body_json, body_string, test_state, upload_request, HEADER};

#[test]
fn upload_reports_counts_and_writes_log() {
    let (_dir, state) = test_state();
    let csv = format!(
        "{HEADER}\
         New York,,1,40.7128,-74.006,US\n\
         New York,,1,40.8,-74.1,US\n\
         Paris,,33,48.8566,2.3522,FRA\n"
    );

    let mut resp = respond(upload_request("cities.csv", csv), &state);

    assert_eq!(resp.status(), 200);
    let json = body_json(&mut resp);
    assert_eq!(json["status"], "processed");
    assert_eq!(json["success"], 1);
    assert_eq!(json["warning"], 1);
    assert_eq!(json["failure"], 1);
    assert_eq!(json["log_saved"], true);
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("File uploaded with 1 successful row(s), 1 failed row(s), and 1 warning(s)."));

    let stored = state.db.with_conn(|conn| count_cities(conn)).unwrap();
    assert_eq!(stored, 1);

    let log = std::fs::read_to_string(&state.config.audit_log_path).unwrap();
    assert!(log.contains("Attempting DB upload for cities.csv"));
    assert!(log.contains("Processing line 4 of upload file"));
}

#[test]
fn wrong_template_keeps_previous_log() {
    let (_dir, state) = test_state();
    let good = format!("{HEADER}Oslo,,47,59.9139,10.7522,NO\n");
    respond(upload_request("first.csv", good), &state);

    let bad = "name,lat,lon\nOslo,59.9,10.7\n";
    let mut resp = respond(upload_request("second.csv", bad), &state);

    assert_eq!(resp.status(), 200);
    let json = body_json(&mut resp);
    assert_eq!(json["status"], "wrong_template");
    assert_eq!(json["success"], -1);
    assert_eq!(json["warning"], -1);
    assert_eq!(json["failure"], -1);

    let log = std::fs::read_to_string(&state.config.audit_log_path).unwrap();
    assert!(log.contains("first.csv"));
    assert!(!log.contains("second.csv"));
}

#[test]
fn header_only_upload_is_empty() {
    let (_dir, state) = test_state();

    let mut resp = respond(upload_request("cities.csv", HEADER), &state);

    let json = body_json(&mut resp);
    assert_eq!(json["status"], "empty");
    assert_eq!(json["success"], 0);

    let log = std::fs::read_to_string(&state.config.audit_log_path).unwrap();
    assert!(log.contains("No data in upload file"));
}

#[test]
fn each_upload_replaces_the_log() {
    let (_dir, state) = test_state();
    respond(
        upload_request("one.csv", format!("{HEADER}Oslo,,47,59.9139,10.7522,NO\n")),
        &state,
    );
    respond(
        upload_request("two.csv", format!("{HEADER}Bergen,,47,60.3913,5.3221,NO\n")),
        &state,
    );

    let log = std::fs::read_to_string(&state.config.audit_log_path).unwrap();
    assert!(!log.contains("one.csv"));
    assert!(log.contains("two.csv"));
}

#[test]
fn missing_file_name_or_body_is_rejected() {
    let (_dir, state) = test_state();

    let mut resp = respond(upload_request("", HEADER), &state);
    assert_eq!(resp.status(), 400);
    assert_eq!(
        body_string(&mut resp),
        "No file selected! Please select a .csv file for upload."
    );

    let resp = respond(upload_request("cities.csv", Vec::<u8>::new()), &state);
    assert_eq!(resp.status(), 400);
}

#[test]
fn non_csv_extension_is_rejected() {
    let (_dir, state) = test_state();

    for name in ["cities.txt", "cities", "cities.CSV.exe"] {
        let mut resp = respond(upload_request(name, HEADER), &state);
        assert_eq!(resp.status(), 400, "{name}");
        assert_eq!(
            body_string(&mut resp),
            "File extension not allowed! Please upload .csv files only!"
        );
    }
    assert!(!state.config.audit_log_path.exists());
}

#[test]
fn oversized_upload_is_rejected() {
    let (_dir, mut state) = test_state();
    state.config.max_upload_bytes = 64;

    let csv = format!("{HEADER}{}", "Oslo,,47,59.9139,10.7522,NO\n".repeat(10));
    let mut resp = respond(upload_request("cities.csv", csv), &state);

    assert_eq!(resp.status(), 413);
    assert_eq!(
        body_string(&mut resp),
        "File size is larger than the max 64 bytes!"
    );
    let stored = state.db.with_conn(|conn| count_cities(conn)).unwrap();
    assert_eq!(stored, 0);
}

#[test]
fn get_on_upload_route_is_not_found() {
    let (_dir, state) = test_state();
    let resp = respond(crate::tests::utils::get("/fileupload"), &state);
    assert_eq!(resp.status(), 404);
}

#[test]
fn unwritable_log_still_reports_the_import() {
    let (dir, mut state) = test_state();
    // A directory cannot be overwritten as a file.
    state.config.audit_log_path = dir.path().to_path_buf();

    let csv = format!("{HEADER}Oslo,,47,59.9139,10.7522,NO\n");
    let mut resp = respond(upload_request("cities.csv", csv), &state);

    assert_eq!(resp.status(), 200);
    let json = body_json(&mut resp);
    assert_eq!(json["status"], "processed");
    assert_eq!(json["success"], 1);
    assert_eq!(json["log_saved"], false);

    let stored = state.db.with_conn(|conn| count_cities(conn)).unwrap();
    assert_eq!(stored, 1);
}
