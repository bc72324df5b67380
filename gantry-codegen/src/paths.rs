//! Import-path constants and lexical path arithmetic.
//!
//! Manifest paths are always slash-separated and normalized before they
//! are recorded, so that logically identical paths reached via different
//! relative-path arithmetic compare equal.

/// Import paths of the transport runtime referenced by binding artifacts.
pub mod runtime {
    pub const TRANSPORT: &str = "github.com/gantry-rpc/gantry/transport";
    pub const HTTP_RUNTIME: &str = "github.com/gantry-rpc/gantry/transport/httpruntime";
    pub const HTTP_TRANSPORT: &str = "github.com/gantry-rpc/gantry/transport/httptransport";
    pub const HTTP_CLIENT: &str = "github.com/gantry-rpc/gantry/transport/httpclient";
    pub const HTTP_MIDDLEWARE: &str = "github.com/gantry-rpc/gantry/transport/httpruntime/httpmw";
    pub const OPENAPI: &str = "github.com/gantry-rpc/gantry/transport/openapi";
}

/// Import path of the OpenAPI spec helper, pulled in only when a file
/// carries a documentation payload.
pub const OPENAPI_SPEC_IMPORT: &str = "github.com/go-openapi/spec";

/// Imports present in every binding artifact.
pub const BINDING_IMPORTS: &[&str] = &[
    "bytes",
    "context",
    "encoding/base64",
    "fmt",
    "io/ioutil",
    "net/http",
    "net/url",
    "strings",
    runtime::HTTP_RUNTIME,
    runtime::HTTP_TRANSPORT,
    runtime::OPENAPI,
    "github.com/grpc-ecosystem/grpc-gateway/v2/runtime",
    "github.com/grpc-ecosystem/grpc-gateway/v2/utilities",
    "google.golang.org/grpc",
    "github.com/go-chi/chi",
    "github.com/pkg/errors",
    runtime::TRANSPORT,
];

/// Marker file declaring a project's canonical module identifier.
pub const ROOT_MARKER: &str = "go.mod";

/// Lexically normalize a slash-separated relative path: fold `.` and `..`
/// segments and drop empty ones. Mirrors Go's `path.Clean` for the paths
/// the generator builds (rooted paths keep their leading slash).
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut out: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match out.last() {
                Some(&"..") | None => {
                    if !rooted {
                        out.push("..");
                    }
                }
                Some(_) => {
                    out.pop();
                }
            },
            _ => out.push(segment),
        }
    }
    let joined = out.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Join path segments with `/` and normalize the result. Empty segments
/// contribute nothing.
pub fn join(segments: &[&str]) -> String {
    let raw: Vec<&str> = segments.iter().copied().filter(|s| !s.is_empty()).collect();
    if raw.is_empty() {
        return String::new();
    }
    clean(&raw.join("/"))
}
