#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{init_tracing, Todo, User};
use http::Method;
use serde_json::json;
use swaggen::{build_spec, media, Endpoint, ParameterLocation, RouteTree, SpecError};

#[test]
fn test_path_assembly() {
    init_tracing();
    let tree = RouteTree::path(
        "todo",
        RouteTree::capture::<i64>(
            "id",
            RouteTree::leaf(Endpoint::json::<Todo>(Method::GET, 200)),
        ),
    );
    let doc = build_spec(&tree).unwrap();

    assert_eq!(doc.paths.len(), 1);
    assert!(doc.paths.contains_key("/todo/{id}"));

    let op = doc.paths["/todo/{id}"].get.as_ref().unwrap();
    let param = &op.parameters[0];
    assert_eq!(param.name, "id");
    assert_eq!(param.location, ParameterLocation::Path);
    assert!(param.required);
    assert_eq!(param.spec["type"], json!("integer"));
    assert_eq!(param.spec["format"], json!("int64"));
    // 64-bit bounds ride along on the parameter schema.
    assert_eq!(param.spec["minimum"], json!(i64::MIN));
    assert_eq!(param.spec["maximum"], json!(i64::MAX));
}

#[test]
fn test_capture_adds_404_response() {
    let tree = RouteTree::capture::<i64>(
        "id",
        RouteTree::leaf(Endpoint::json::<Todo>(Method::GET, 200)),
    );
    let doc = build_spec(&tree).unwrap();
    let op = doc.paths["/{id}"].get.as_ref().unwrap();
    assert_eq!(op.responses[&404].description, "`id` not found");
}

#[test]
fn test_404_descriptions_merge_innermost_last() {
    // id1 sits closest to the leaf, id2 wraps it. The outer capture's name
    // is prepended to the existing description.
    let tree = RouteTree::capture::<i64>(
        "id2",
        RouteTree::capture::<i64>(
            "id1",
            RouteTree::leaf(Endpoint::json::<Todo>(Method::GET, 200)),
        ),
    );
    let doc = build_spec(&tree).unwrap();
    let op = doc.paths["/{id2}/{id1}"].get.as_ref().unwrap();
    assert_eq!(op.responses[&404].description, "`id2` or `id1` not found");
}

#[test]
fn test_400_descriptions_merge_opposite_order() {
    // a sits closest to the leaf, b wraps it. The outer parameter's name is
    // appended, the opposite accumulation order from the 404 rule.
    let tree = RouteTree::query::<String>(
        "b",
        RouteTree::query::<String>(
            "a",
            RouteTree::leaf(Endpoint::json::<Todo>(Method::GET, 200)),
        ),
    );
    let doc = build_spec(&tree).unwrap();
    let op = doc.paths["/"].get.as_ref().unwrap();
    assert_eq!(op.responses[&400].description, "Invalid `a` or `b`");
    // Parameters accumulate leaf-outward.
    let names: Vec<&str> = op.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_no_content_produces_204_not_200() {
    let tree = RouteTree::leaf(Endpoint::json::<()>(Method::DELETE, 200));
    let doc = build_spec(&tree).unwrap();
    let op = doc.paths["/"].delete.as_ref().unwrap();
    assert!(op.responses.get(&200).is_none());
    let resp = &op.responses[&204];
    assert!(resp.schema.is_none());
}

#[test]
fn test_choice_unions_methods_and_definitions() {
    let tree = RouteTree::choice(
        RouteTree::leaf(Endpoint::json::<Todo>(Method::GET, 200)),
        RouteTree::leaf(Endpoint::json::<User>(Method::POST, 201)),
    );
    let doc = build_spec(&tree).unwrap();

    assert_eq!(doc.paths.len(), 1);
    let item = &doc.paths["/"];
    assert!(item.get.is_some());
    assert!(item.post.is_some());
    assert!(doc.definitions.contains_key("Todo"));
    assert!(doc.definitions.contains_key("User"));
}

#[test]
fn test_choice_with_same_method_fails_fast() {
    let tree = RouteTree::choice(
        RouteTree::leaf(Endpoint::json::<Todo>(Method::GET, 200)),
        RouteTree::leaf(Endpoint::json::<User>(Method::GET, 200)),
    );
    match build_spec(&tree) {
        Err(SpecError::DuplicateRoute { path, method }) => {
            assert_eq!(path, "/");
            assert_eq!(method, Method::GET);
        }
        other => panic!("expected DuplicateRoute, got {other:?}"),
    }
}

#[test]
fn test_multi_status_endpoint_gets_one_response_per_status() {
    let endpoint = Endpoint::json::<Todo>(Method::GET, 203).with_response::<User>(303);
    let doc = build_spec(&RouteTree::leaf(endpoint)).unwrap();
    let op = doc.paths["/"].get.as_ref().unwrap();

    assert_eq!(op.responses.len(), 2);
    assert!(op.responses.get(&200).is_none());
    assert_eq!(
        op.responses[&203].schema,
        Some(json!({ "$ref": "#/definitions/Todo" }))
    );
    assert_eq!(
        op.responses[&303].schema,
        Some(json!({ "$ref": "#/definitions/User" }))
    );
    assert!(doc.definitions.contains_key("Todo"));
    assert!(doc.definitions.contains_key("User"));
}

#[test]
fn test_body_contributes_param_consumes_definitions_and_400() {
    let tree = RouteTree::path(
        "todo",
        RouteTree::json_body::<Todo>(RouteTree::leaf(Endpoint::json::<Todo>(Method::POST, 201))),
    );
    let doc = build_spec(&tree).unwrap();
    let op = doc.paths["/todo"].post.as_ref().unwrap();

    let body = &op.parameters[0];
    assert_eq!(body.name, "body");
    assert_eq!(body.location, ParameterLocation::Body);
    assert!(body.required);
    assert_eq!(body.schema, Some(json!({ "$ref": "#/definitions/Todo" })));

    assert_eq!(op.consumes, vec![media::APPLICATION_JSON.to_string()]);
    assert_eq!(op.responses[&400].description, "Invalid `body`");
    assert!(doc.definitions.contains_key("Todo"));
}

#[test]
fn test_header_param_and_400() {
    let tree = RouteTree::header::<String>(
        "X-Token",
        RouteTree::leaf(Endpoint::json::<Todo>(Method::GET, 200)),
    );
    let doc = build_spec(&tree).unwrap();
    let op = doc.paths["/"].get.as_ref().unwrap();

    let param = &op.parameters[0];
    assert_eq!(param.name, "X-Token");
    assert_eq!(param.location, ParameterLocation::Header);
    assert!(!param.required);
    assert_eq!(op.responses[&400].description, "Invalid `X-Token`");
}

#[test]
fn test_response_headers_are_documented() {
    let endpoint = Endpoint::json::<Todo>(Method::GET, 200).with_header::<i32>("X-Total-Count");
    let doc = build_spec(&RouteTree::leaf(endpoint)).unwrap();
    let op = doc.paths["/"].get.as_ref().unwrap();
    let headers = &op.responses[&200].headers;
    assert_eq!(headers["X-Total-Count"]["type"], json!("integer"));
}

#[test]
fn test_produces_renders_full_mime_strings() {
    let doc = build_spec(&RouteTree::leaf(Endpoint::json::<Todo>(Method::GET, 200))).unwrap();
    let op = doc.paths["/"].get.as_ref().unwrap();
    assert_eq!(op.produces, vec!["application/json;charset=utf-8".to_string()]);
}

#[test]
fn test_document_serializes_with_defaults() {
    let tree = RouteTree::path(
        "todo",
        RouteTree::leaf(Endpoint::json::<Todo>(Method::GET, 200)),
    );
    let doc = build_spec(&tree).unwrap();
    let rendered: serde_json::Value =
        serde_json::from_str(&doc.to_json_string().unwrap()).unwrap();

    assert_eq!(rendered["swagger"], json!("2.0"));
    assert_eq!(rendered["info"], json!({ "title": "", "version": "" }));
    assert!(rendered["paths"]["/todo"]["get"]["responses"]["200"].is_object());
    assert!(rendered["definitions"]["Todo"].is_object());
}
