#![allow(dead_code)]

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Write `content` to a temporary file with the given extension.
    /// The file is removed when the handle drops.
    pub fn create_temp_manifest(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("routeway_test_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        create_temp_manifest(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> NamedTempFile {
        create_temp_manifest(content, "json")
    }
}

pub mod requests {
    use routeway::ServerRequest;

    pub fn request(method: &str, uri: &str) -> ServerRequest {
        http::Request::builder()
            .method(method)
            .uri(uri)
            .body(None)
            .unwrap()
    }

    pub fn get(uri: &str) -> ServerRequest {
        request("GET", uri)
    }
}

pub mod routing {
    use routeway::Router;

    /// Assert `method path` matches the route `expected_key`, or nothing when
    /// `expected_key` is `<none>`.
    pub fn assert_route_match(router: &Router, method: &str, path: &str, expected_key: &str) {
        match router.match_route(method, path) {
            Some(matched) => {
                println!("✅ {} {} → {}", method, path, matched.key());
                assert_eq!(
                    matched.key(),
                    expected_key,
                    "Route mismatch for {} {}: expected '{}', got '{}'",
                    method,
                    path,
                    expected_key,
                    matched.key()
                );
            }
            None => {
                println!("❌ {} {} → no match", method, path);
                assert_eq!(
                    expected_key, "<none>",
                    "Expected route to match for {} {}",
                    method, path
                );
            }
        }
    }
}
