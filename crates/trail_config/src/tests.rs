use super::*;
use pretty_assertions::assert_eq;
use trail_pattern::Uri;

const ROUTES: &str = r#"
# sample application
tenant   "<tenant>.example.com/<page>"      @host  page=home
api      "/<resource>[/<id:\d+>]"           @prefix=/api
docs     "/docs/<path>"                     :path=.+
default  "/<controller>[/<action>[/<id>]]"  controller=welcome action="index"
"#;

#[test]
fn parses_definitions() {
    let definitions = parse_routes(ROUTES).unwrap();
    let names: Vec<_> = definitions.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["tenant", "api", "docs", "default"]);

    assert_eq!(
        definitions[1],
        RouteDefinition {
            name: "api".into(),
            template: "/<resource>[/<id:\\d+>]".into(),
            prefix: "/api".into(),
            match_host: false,
            constraints: vec![],
            defaults: Params::new(),
            line: 4,
        }
    );
    assert!(definitions[0].match_host);
    assert_eq!(definitions[0].defaults, Params::new().with("page", "home"));
    assert_eq!(
        definitions[2].constraints,
        vec![("path".to_string(), ".+".to_string())]
    );
    assert_eq!(
        definitions[3].defaults,
        Params::new()
            .with("controller", "welcome")
            .with("action", "index")
    );
}

#[test]
fn table_from_definitions() {
    let table = into_table(parse_routes(ROUTES).unwrap(), None).unwrap();

    let docs = table.resolve(&Uri::parse("/docs/guide/intro").unwrap()).unwrap();
    assert_eq!(docs.name, "docs");
    assert_eq!(docs.params.get("path"), Some("guide/intro"));

    let api = table.resolve(&Uri::parse("/api/users/12").unwrap()).unwrap();
    assert_eq!(api.name, "api");
    assert_eq!(api.params.get("id"), Some("12"));

    // host routes see the host, so plain paths fall through to the rest
    let tenant = table
        .resolve(&Uri::parse("http://acme.example.com/welcome").unwrap())
        .unwrap();
    assert_eq!(tenant.name, "tenant");
    assert_eq!(tenant.params.get("tenant"), Some("acme"));
    assert_eq!(tenant.params.get("page"), Some("welcome"));

    assert_eq!(
        table
            .url_for("api", [("resource", "users"), ("id", "12")])
            .unwrap()
            .to_string(),
        "api/users/12"
    );
}

#[test]
fn syntax_errors_point_at_the_problem() {
    let err = parse_routes("ok \"/\"\n\nbad \"/<a>\" @bogus\n").unwrap_err();
    assert_eq!(err.to_string(), "line 3, column 11: unexpected '@'");

    let err = parse_routes("x \"/unterminated").unwrap_err();
    assert!(matches!(err, ConfigError::Syntax { line: 1, .. }));
}

#[test]
fn duplicate_routes_fail_the_table() {
    let definitions = parse_routes("a \"/x\"\na \"/y\"").unwrap();
    assert!(matches!(
        into_table(definitions, None),
        Err(ConfigError::Routes(RouteBuildError::DuplicateName(name))) if name == "a"
    ));
}

#[test]
fn cached_tables_share_routes() {
    let cache = RouteCache::new();
    into_table(parse_routes(ROUTES).unwrap(), Some(&cache)).unwrap();
    into_table(parse_routes(ROUTES).unwrap(), Some(&cache)).unwrap();
    assert_eq!(cache.len(), 4);
}

#[test]
fn missing_file() {
    let err = load_routes("/definitely/not/here.routes").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().starts_with("cannot read /definitely/not/here.routes: "));
}
