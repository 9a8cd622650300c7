mod common;

use common::requests::{get, request};
use routeway::dispatcher::{
    Handler, HandlerContext, HandlerRegistry, HandlerResponse, ParamDecl, ServerRequest,
    ServiceContainer,
};
use routeway::{RouteCollection, RouteParams, Router, RouterError};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn routes() -> RouteCollection {
    let mut routes = RouteCollection::new();
    routes
        .group(|g| {
            g.set_namespace("App\\");
            g.get("home", "/", "Home@index")?;
            g.get("post", "/posts/{id}", "Posts@show")?
                .where_digits("id")
                .set_default("format", "html");
            g.post("post.store", "/posts", "Posts@store")?;
            g.get("broken", "/broken", "NoAction")?;
            g.get("greet", "/greet", "Greeter@hello")?;
            Ok(())
        })
        .unwrap();
    routes
}

fn echo(ctx: &HandlerContext<'_>, params: &RouteParams, req: &ServerRequest) -> HandlerResponse {
    HandlerResponse::ok_json(json!({
        "route": ctx.route.key(),
        "target": ctx.target,
        "action": ctx.action,
        "params": params.to_map(),
        "method": req.method().as_str(),
    }))
}

#[test]
fn test_dispatch_passes_context_params_and_request() {
    let mut handlers = HandlerRegistry::new();
    handlers.register("App\\Posts@show", echo);
    let router = Router::new(routes()).unwrap().with_handlers(handlers);

    let response = router.dispatch(&get("/posts/5")).unwrap().unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.get_header("Content-Type"), Some("application/json"));
    assert_eq!(
        response.body,
        json!({
            "route": "post",
            "target": "App\\Posts",
            "action": "show",
            "params": { "id": "5", "format": "html" },
            "method": "GET",
        })
    );
}

#[test]
fn test_query_params_merge_under_path_params() {
    let mut handlers = HandlerRegistry::new();
    handlers.register("App\\Posts@show", echo);
    let router = Router::new(routes()).unwrap().with_handlers(handlers);

    let response = router
        .dispatch(&get("/posts/5?id=99&format=json&q=rust%20lang"))
        .unwrap()
        .unwrap();
    assert_eq!(
        response.body["params"],
        json!({ "id": "5", "format": "html", "q": "rust lang" })
    );
}

#[test]
fn test_declared_params_bind_defaults_and_requirements() {
    let mut handlers = HandlerRegistry::new();
    handlers.register_with_params(
        "App\\Home@index",
        vec![ParamDecl::optional("page").default_value(1), ParamDecl::optional("sort")],
        echo,
    );
    handlers.register_with_params(
        "App\\Posts@store",
        vec![ParamDecl::required("title")],
        echo,
    );
    let router = Router::new(routes()).unwrap().with_handlers(handlers);

    let home = router.dispatch(&get("/")).unwrap().unwrap();
    assert_eq!(home.body["params"], json!({ "page": "1" }));

    let err = router.dispatch(&request("POST", "/posts")).unwrap_err();
    assert_eq!(
        err,
        RouterError::MissingRequiredDispatchParameter {
            parameter: "title".to_string(),
            handler: "App\\Posts@store".to_string(),
        }
    );

    let stored = router
        .dispatch(&request("POST", "/posts?title=Hello"))
        .unwrap()
        .unwrap();
    assert_eq!(stored.body["params"], json!({ "title": "Hello" }));
}

#[test]
fn test_unknown_handler_and_bad_reference() {
    let router = Router::new(routes()).unwrap();
    assert_eq!(
        router.dispatch(&get("/")).unwrap_err(),
        RouterError::HandlerNotFound("App\\Home@index".to_string())
    );
    assert_eq!(
        router.dispatch(&get("/broken")).unwrap_err(),
        RouterError::InvalidHandlerRef {
            handler: "App\\NoAction".to_string()
        }
    );
}

#[test]
fn test_no_match_is_not_an_error() {
    let router = Router::new(routes()).unwrap();
    assert!(router.dispatch(&get("/nowhere")).unwrap().is_none());
}

#[test]
fn test_handlers_reach_container_services() {
    struct Greeting(&'static str);

    let container = ServiceContainer::new().with("greeting", Greeting("hello"));
    let mut handlers = HandlerRegistry::new().with_container(Arc::new(container));
    handlers.register("App\\Greeter@hello", |ctx, _params, _req| {
        match ctx.service::<Greeting>("greeting") {
            Some(greeting) => HandlerResponse::ok_json(json!({ "message": greeting.0 })),
            None => HandlerResponse::error(500, "greeting service missing"),
        }
    });
    let router = Router::new(routes()).unwrap().with_handlers(handlers);

    let response = router.dispatch(&get("/greet")).unwrap().unwrap();
    assert_eq!(response.body, json!({ "message": "hello" }));
}

#[test]
fn test_handler_trait_objects_and_replacement() {
    struct CountingHandler(Arc<AtomicUsize>);

    impl Handler for CountingHandler {
        fn handle(
            &self,
            _ctx: &HandlerContext<'_>,
            _params: &RouteParams,
            _request: &ServerRequest,
        ) -> HandlerResponse {
            let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
            HandlerResponse::ok_json(json!({ "count": n }))
        }
    }

    let counter = Arc::new(AtomicUsize::new(0));
    let mut handlers = HandlerRegistry::new();
    handlers.register("App\\Home@index", |_ctx, _params, _req| HandlerResponse::not_found());
    handlers.register_handler(
        "App\\Home@index",
        Vec::new(),
        CountingHandler(Arc::clone(&counter)),
    );
    assert_eq!(handlers.len(), 1);

    let router = Router::new(routes()).unwrap().with_handlers(handlers);
    router.dispatch(&get("/")).unwrap();
    let response = router.dispatch(&get("/")).unwrap().unwrap();
    assert_eq!(response.body, json!({ "count": 2 }));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_execute_named_route_without_matching() {
    let mut handlers = HandlerRegistry::new();
    handlers.register("App\\Posts@show", echo);
    let router = Router::new(routes()).unwrap().with_handlers(handlers);

    let route = router.routes().try_get_route("post").unwrap();
    let response = router.execute(route, &get("/somewhere/else")).unwrap();
    assert_eq!(response.body["params"], json!({ "format": "html" }));
}
