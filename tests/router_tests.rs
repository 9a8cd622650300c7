mod common;

use common::requests::{get, request};
use common::routing::assert_route_match;
use routeway::{Constraints, GroupContext, RouteCollection, RouteParams, Router, RouterError};

fn verb_zoo() -> Router {
    let mut routes = RouteCollection::new();
    routes
        .group(|g| {
            g.get("root", "/", "Root@index")?;
            g.group(|zoo| {
                zoo.prefix_with("/zoo", Constraints::new().with("id", r"\d+"))
                    .name("zoo.");
                zoo.get("animals", "/animals", "Animals@index")?;
                zoo.post("animals.create", "/animals", "Animals@create")?;
                zoo.get("animal", "/animals/{id}", "Animals@show")?;
                zoo.put("animal.update", "/animals/{id}", "Animals@update")?;
                zoo.patch("animal.patch", "/animals/{id}", "Animals@patch")?;
                zoo.delete("animal.delete", "/animals/{id}", "Animals@destroy")?;
                zoo.head("health", "/health", "Health@check")?;
                zoo.options("health.options", "/health", "Health@options")?;
                Ok(())
            })
        })
        .unwrap();
    Router::new(routes).unwrap()
}

#[test]
fn test_router_verbs() {
    let router = verb_zoo();
    assert_route_match(&router, "GET", "/zoo/animals", "zoo.animals");
    assert_route_match(&router, "POST", "/zoo/animals", "zoo.animals.create");
    assert_route_match(&router, "GET", "/zoo/animals/123", "zoo.animal");
    assert_route_match(&router, "PUT", "/zoo/animals/123", "zoo.animal.update");
    assert_route_match(&router, "PATCH", "/zoo/animals/123", "zoo.animal.patch");
    assert_route_match(&router, "DELETE", "/zoo/animals/123", "zoo.animal.delete");
    assert_route_match(&router, "HEAD", "/zoo/health", "zoo.health");
    assert_route_match(&router, "OPTIONS", "/zoo/health", "zoo.health.options");
    assert_route_match(&router, "TRACE", "/zoo/health", "<none>");
}

#[test]
fn test_router_unknown_path() {
    let router = verb_zoo();
    assert_route_match(&router, "GET", "/unknown", "<none>");
    assert_route_match(&router, "GET", "/zoo/animals/abc", "<none>");
}

// Scenario: home route matches `/` only.
#[test]
fn test_home_route() {
    let mut routes = RouteCollection::new();
    routes
        .group(|g| {
            g.get("home", "/", "Home@index")?;
            Ok(())
        })
        .unwrap();
    let router = Router::new(routes).unwrap();

    assert_eq!(router.parse(&get("/")).unwrap().key(), "home");
    assert!(router.parse(&get("/x")).is_none());
}

fn page_router() -> Router {
    let mut routes = RouteCollection::new();
    routes
        .group(|g| {
            g.get("page", "/page/{id}", "Page@show")?.where_digits("id");
            g.put("page.update", "/page/{id}", "Page@update")?
                .where_digits("id");
            g.post("page.create", "/page/{id}", "Page@create")?
                .where_digits("id");
            Ok(())
        })
        .unwrap();
    Router::new(routes).unwrap()
}

#[test]
fn test_page_route_extracts_digits() {
    let router = page_router();
    let matched = router.parse(&get("/page/42")).unwrap();
    assert_eq!(matched.key(), "page");
    assert_eq!(matched.get_param("id"), Some("42"));
    assert!(router.parse(&get("/page/abc")).is_none());
}

#[test]
fn test_page_route_generation() {
    let router = page_router();
    assert_eq!(
        router
            .generate_path("page", &RouteParams::new().with("id", "42"), true)
            .unwrap(),
        "/page/42"
    );
    assert!(matches!(
        router.generate_path("page", &RouteParams::new(), true),
        Err(RouterError::MissingArgument { .. })
    ));
    match router.generate_path("page", &RouteParams::new().with("id", "abc"), true) {
        Err(RouterError::ArgumentConstraintViolation {
            parameter,
            pattern,
            path,
        }) => {
            assert_eq!(parameter, "id");
            assert_eq!(pattern, r"\d+");
            assert_eq!(path, "/page/{id}");
        }
        other => panic!("expected constraint violation, got {other:?}"),
    }
}

#[test]
fn test_method_override_selects_put() {
    let router = page_router();
    let post = request("POST", "/page/7");
    assert_eq!(router.parse(&post).unwrap().key(), "page.create");

    let mut overridden = request("POST", "/page/7");
    overridden
        .headers_mut()
        .insert("x-http-method-override", "PUT".parse().unwrap());
    assert_eq!(router.parse(&overridden).unwrap().key(), "page.update");
}

#[test]
fn test_try_get_route_not_found() {
    let router = page_router();
    assert_eq!(
        router.routes().try_get_route("nonexistent").unwrap_err(),
        RouterError::RouteNotFound("nonexistent".to_string())
    );
    assert!(matches!(
        router.generate_path("nonexistent", &RouteParams::new(), false),
        Err(RouterError::RouteNotFound(_))
    ));
}

#[test]
fn test_literal_routes_match_exactly() {
    let mut routes = RouteCollection::new();
    routes
        .group(|g| {
            g.get("items", "/items", "Items@index")?;
            g.get("literal", "/items/{id}", "Items@literal")?;
            Ok(())
        })
        .unwrap();
    let router = Router::new(routes).unwrap();

    assert_route_match(&router, "GET", "/items", "items");
    assert_route_match(&router, "GET", "/items/", "<none>");
    assert_route_match(&router, "GET", "/items/extra", "<none>");
    assert_route_match(&router, "GET", "/item", "<none>");
    assert_route_match(&router, "GET", "/items/{id}", "literal");
}

#[test]
fn test_registration_order_wins_when_both_match() {
    let mut routes = RouteCollection::new();
    routes
        .group(|g| {
            g.get("a", "/items/{id}", "Items@show")?.where_words("id");
            g.get("b", "/items/new", "Items@new")?;
            Ok(())
        })
        .unwrap();
    let router = Router::new(routes).unwrap();
    assert_route_match(&router, "GET", "/items/new", "a");

    let mut routes = RouteCollection::new();
    routes
        .group(|g| {
            g.get("a", "/items/{id}", "Items@show")?.where_digits("id");
            g.get("b", "/items/new", "Items@new")?;
            Ok(())
        })
        .unwrap();
    let router = Router::new(routes).unwrap();
    assert_route_match(&router, "GET", "/items/new", "b");
    assert_route_match(&router, "GET", "/items/3", "a");
}

#[test]
fn test_generate_then_parse_round_trip() {
    let mut routes = RouteCollection::new();
    routes
        .group(|g| {
            g.prefix("/shop").name("shop.");
            g.get("product", "/{category}/{sku}", "Shop@product")?
                .where_slug("category")
                .where_pattern("sku", "[A-Z]{3}-(?:\\d{4})");
            g.get("order", "/orders/{id}", "Shop@order")?
                .where_digits("id");
            Ok(())
        })
        .unwrap();
    let router = Router::new(routes).unwrap();

    let cases = [
        (
            "shop.product",
            RouteParams::new()
                .with("category", "garden-tools")
                .with("sku", "ABC-1234"),
        ),
        ("shop.order", RouteParams::new().with("id", 991)),
    ];
    for (name, args) in cases {
        let path = router.generate_path(name, &args, true).unwrap();
        let matched = router.parse(&get(&path)).unwrap();
        assert_eq!(matched.key(), name, "round trip through {path}");
        for (k, v) in args.iter() {
            assert_eq!(matched.get_param(k), Some(v));
        }
    }
}

#[test]
fn test_group_prefixes_compose() {
    let mut routes = RouteCollection::new();
    routes
        .group(|api| {
            api.prefix("/api");
            api.group(|v1| {
                v1.prefix("/v1");
                v1.get("list", "/items", "Items@index")?;
                Ok(())
            })
        })
        .unwrap();
    let router = Router::new(routes).unwrap();
    assert_eq!(router.routes().try_get_route("list").unwrap().path(), "/api/v1/items");
    assert_route_match(&router, "GET", "/api/v1/items", "list");
}

#[test]
fn test_nested_constraints_child_overrides_parent() {
    let mut routes = RouteCollection::new();
    let parent = GroupContext::new().with_constraints(
        Constraints::new()
            .with("id", r"\d+")
            .with("lang", "en|fr"),
    );
    routes
        .group_with(parent, |g| {
            g.get("parent", "/{lang}/p/{id}", "P@show")?;
            g.group(|child| {
                child.withs(Constraints::new().with("id", "[a-z]+"));
                child.get("child", "/{lang}/c/{id}", "C@show")?;
                Ok(())
            })
        })
        .unwrap();
    let router = Router::new(routes).unwrap();

    assert_route_match(&router, "GET", "/en/p/12", "parent");
    assert_route_match(&router, "GET", "/en/p/ab", "<none>");
    assert_route_match(&router, "GET", "/fr/c/ab", "child");
    assert_route_match(&router, "GET", "/fr/c/12", "<none>");
    assert_route_match(&router, "GET", "/de/c/ab", "<none>");
}

#[test]
fn test_base_path_applies_to_matching_and_generation() {
    let mut router = page_router();
    router.set_base_path("/app");
    assert_eq!(router.base_path(), "/app");

    assert_route_match(&router, "GET", "/app/page/3", "page");
    assert_route_match(&router, "GET", "/page/3", "<none>");
    assert_route_match(&router, "GET", "/apple/page/3", "<none>");
    assert_eq!(
        router
            .generate_path("page", &RouteParams::new().with("id", 3), true)
            .unwrap(),
        "/app/page/3"
    );
}

#[test]
fn test_captures_are_percent_decoded() {
    let mut routes = RouteCollection::new();
    routes
        .group(|g| {
            g.get("search", "/search/{term}", "Search@run")?
                .where_pattern("term", "[^/]+");
            Ok(())
        })
        .unwrap();
    let router = Router::new(routes).unwrap();
    let matched = router.parse(&get("/search/caf%C3%A9%20au%20lait")).unwrap();
    assert_eq!(matched.get_param("term"), Some("café au lait"));
}

#[test]
fn test_router_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync + Clone>() {}
    assert_send_sync::<Router>();
}
