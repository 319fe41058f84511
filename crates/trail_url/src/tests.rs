use super::{Uri, UriError, UriLike};
use pretty_assertions::assert_eq;

#[test]
fn baseline() {
    let uri = Uri::parse("/hello/world").unwrap();
    assert_eq!(uri.path(), "/hello/world");
    assert_eq!(uri.host(), "");
    assert_eq!(uri.query(), None);
    assert_eq!(uri.to_string(), "/hello/world");
}

#[test]
fn optional_slash() {
    let uri = Uri::parse("hello/world").unwrap();
    assert_eq!(uri.path(), "hello/world");
    assert_eq!(uri.to_string(), "hello/world");
}

#[test]
fn hex() {
    let uri = Uri::parse("/hello/w%C3%B6rld").unwrap();
    assert_eq!(uri.path(), "/hello/wörld");
    assert_eq!(uri.to_string(), "/hello/w%C3%B6rld");
}

#[test]
fn dots() {
    let uri = Uri::parse("/hello/./test/../world").unwrap();
    assert_eq!(uri.path(), "/hello/world");
}

#[test]
fn empty_segments() {
    let uri = Uri::parse("/hello//world/").unwrap();
    assert_eq!(uri.path(), "/hello/world");

    let root = Uri::parse("/").unwrap();
    assert_eq!(root.path(), "/");

    let empty = Uri::parse("").unwrap();
    assert_eq!(empty.path(), "");
}

#[test]
fn query() {
    let uri = Uri::parse("/hello/?world=hi").unwrap();
    assert_eq!(uri.path(), "/hello");
    assert_eq!(uri.query(), Some("world=hi"));
    assert_eq!(uri.to_string(), "/hello?world=hi");
}

#[test]
fn query_hex() {
    let uri = Uri::parse("/hello?w%C3%B6rld=hi").unwrap();
    assert_eq!(uri.query(), Some("w%C3%B6rld=hi"));
}

#[test]
fn absolute() {
    let uri = Uri::parse("https://user@Example.com:8443/a/b?x=1#frag").unwrap();
    assert_eq!(uri.scheme(), Some("https"));
    assert_eq!(uri.host(), "Example.com");
    assert_eq!(uri.port(), Some(8443));
    assert_eq!(uri.path(), "/a/b");
    assert_eq!(uri.query(), Some("x=1"));
    assert_eq!(uri.to_string(), "https://Example.com:8443/a/b?x=1");
}

#[test]
fn scheme_relative() {
    let uri = Uri::parse("//example.com").unwrap();
    assert_eq!(uri.scheme(), None);
    assert_eq!(uri.host(), "example.com");
    assert_eq!(uri.path(), "/");
}

#[test]
fn ipv6_host() {
    let uri = Uri::parse("http://[::1]:8080/x").unwrap();
    assert_eq!(uri.host(), "[::1]");
    assert_eq!(uri.port(), Some(8080));

    let bare = Uri::parse("http://[::1]/x").unwrap();
    assert_eq!(bare.host(), "[::1]");
    assert_eq!(bare.port(), None);
}

#[test]
fn errors() {
    assert_eq!(
        Uri::parse("/hello world"),
        Err(UriError::Invalid { offset: 6 })
    );
    assert_eq!(Uri::parse("/%G1"), Err(UriError::Invalid { offset: 1 }));
    assert_eq!(Uri::parse("/%FF"), Err(UriError::Encoding { offset: 1 }));
    assert_eq!(
        Uri::parse("http://host:99999/"),
        Err(UriError::Port(String::from("99999")))
    );
}

#[test]
fn with_query_returns_new_value() {
    let uri = Uri::from_path("users");
    let queried = uri.with_query("page=2");

    assert_eq!(uri.query(), None);
    assert_eq!(queried.query(), Some("page=2"));
    assert_eq!(queried.to_string(), "users?page=2");
    assert_eq!(queried.with_query("").query(), None);
}

#[test]
fn host_and_relative_path() {
    let uri = Uri::with_host("api.example.com", "users/1");
    assert_eq!(uri.to_string(), "//api.example.com/users/1");
}

#[test]
fn from_str() {
    let uri: Uri = "/foo/bar?baz=qux".parse().unwrap();
    assert_eq!(uri.path(), "/foo/bar");
    assert_eq!(uri.query(), Some("baz=qux"));
}
