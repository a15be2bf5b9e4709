mod download_tests;
mod upload_tests;
