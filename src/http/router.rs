use crate::config::RouteTable;
use crate::http::method::Method;
use crate::http::parse::{area_query, prefix_and_value};
use crate::http::status::Status;
use std::path::{Component, Path, PathBuf};

/// Which handler serves a request, with the parameters it needs already
/// pulled out of the target.
#[derive(Debug, PartialEq)]
pub enum Route {
    Redirect,
    Upload { file_name: String },
    Image { file_name: String },
    NextNumber { arg: String },
    Area { height: String, width: String },
    Canned(Status),
    NotFound { path: String },
    Static { path: PathBuf, extension: String },
}

pub struct Router<'a> {
    routes: &'a RouteTable,
    web_root: &'a Path,
}

impl<'a> Router<'a> {
    pub fn new(routes: &'a RouteTable, web_root: &'a Path) -> Router<'a> {
        Router { routes, web_root }
    }

    /// First match wins. A target can fit several shapes, so the order of the
    /// checks below is the only tie-break.
    pub fn route(&self, target: &str, method: Method) -> Route {
        let routes = self.routes;
        let uri = if target == "/" {
            routes.default_url.as_str()
        } else {
            target
        };

        if uri == routes.moved {
            return Route::Redirect;
        }

        let (prefix, value) = prefix_and_value(uri);

        if method == Method::POST && prefix == routes.upload {
            return Route::Upload {
                file_name: value.to_string(),
            };
        }

        if prefix == routes.image {
            return Route::Image {
                file_name: value.to_string(),
            };
        }

        if prefix == routes.next_number {
            return Route::NextNumber {
                arg: value.to_string(),
            };
        }

        if let Some((path, query)) = uri.split_once('?') {
            if path == routes.area {
                if let Some((height, width)) = area_query(query) {
                    return Route::Area {
                        height: height.to_string(),
                        width: width.to_string(),
                    };
                }
            }
        }

        if let Some((_, status)) = routes.canned.iter().find(|(path, _)| path == uri) {
            return Route::Canned(*status);
        }

        match resolve(self.web_root, uri) {
            Some(path) if path.is_file() => Route::Static {
                path,
                extension: extension_of(uri).to_string(),
            },
            _ => Route::NotFound {
                path: uri.to_string(),
            },
        }
    }
}

/// Maps a target onto the content root, refusing anything that would leave it.
fn resolve(root: &Path, uri: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for comp in Path::new(uri.trim_start_matches('/')).components() {
        match comp {
            Component::Normal(s) => path.push(s),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(path)
}

/// Text after the last `.` of the target, or the whole target if it has none.
fn extension_of(uri: &str) -> &str {
    uri.rsplit_once('.').map_or(uri, |(_, ext)| ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn web_root() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        fs::create_dir(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("css").join("site.css"), "body {}").unwrap();
        dir
    }

    fn route(root: &TempDir, target: &str, method: Method) -> Route {
        let table = RouteTable::default();
        Router::new(&table, root.path()).route(target, method)
    }

    #[test]
    fn root_is_rewritten_to_default_document() {
        let root = web_root();
        assert_eq!(
            route(&root, "/", Method::GET),
            Route::Static {
                path: root.path().join("index.html"),
                extension: "html".to_string(),
            }
        );
    }

    #[test]
    fn moved_redirects() {
        let root = web_root();
        assert_eq!(route(&root, "/moved", Method::GET), Route::Redirect);
        assert_eq!(route(&root, "/moved", Method::POST), Route::Redirect);
    }

    #[test]
    fn upload_requires_post() {
        let root = web_root();
        assert_eq!(
            route(&root, "/upload?file-name=a.jpg", Method::POST),
            Route::Upload {
                file_name: "a.jpg".to_string()
            }
        );
        assert!(!matches!(
            route(&root, "/upload?file-name=a.jpg", Method::GET),
            Route::Upload { .. }
        ));
    }

    #[test]
    fn image_and_next_number() {
        let root = web_root();
        assert_eq!(
            route(&root, "/image?image-name=turtle.jpg", Method::GET),
            Route::Image {
                file_name: "turtle.jpg".to_string()
            }
        );
        assert_eq!(
            route(&root, "/calculate-next?num=5", Method::GET),
            Route::NextNumber {
                arg: "5".to_string()
            }
        );
        assert_eq!(
            route(&root, "/calculate-next?num", Method::GET),
            Route::NextNumber { arg: String::new() }
        );
    }

    #[test]
    fn area_in_either_order() {
        let root = web_root();
        let expected = Route::Area {
            height: "3".to_string(),
            width: "4".to_string(),
        };
        assert_eq!(
            route(&root, "/calculate-area?height=3&width=4", Method::GET),
            expected
        );
        assert_eq!(
            route(&root, "/calculate-area?width=4&height=3", Method::GET),
            expected
        );
    }

    #[test]
    fn malformed_area_query_falls_through_to_not_found() {
        let root = web_root();
        assert!(matches!(
            route(&root, "/calculate-area?height=3", Method::GET),
            Route::NotFound { .. }
        ));
        assert!(matches!(
            route(&root, "/calculate-area", Method::GET),
            Route::NotFound { .. }
        ));
    }

    #[test]
    fn canned_statuses() {
        let root = web_root();
        assert_eq!(
            route(&root, "/forbidden", Method::GET),
            Route::Canned(Status::FORBIDDEN)
        );
        assert_eq!(
            route(&root, "/error", Method::GET),
            Route::Canned(Status::INTERNAL_SERVER_ERROR)
        );
    }

    #[test]
    fn static_files_and_missing_files() {
        let root = web_root();
        assert_eq!(
            route(&root, "/css/site.css", Method::GET),
            Route::Static {
                path: root.path().join("css").join("site.css"),
                extension: "css".to_string(),
            }
        );
        assert_eq!(
            route(&root, "/missing.html", Method::GET),
            Route::NotFound {
                path: "/missing.html".to_string()
            }
        );
        // directories are not files
        assert!(matches!(
            route(&root, "/css", Method::GET),
            Route::NotFound { .. }
        ));
    }

    #[test]
    fn parent_components_never_resolve() {
        let root = web_root();
        assert!(matches!(
            route(&root, "/../index.html", Method::GET),
            Route::NotFound { .. }
        ));
        assert!(matches!(
            route(&root, "/css/../../index.html", Method::GET),
            Route::NotFound { .. }
        ));
    }

    #[test]
    fn extension_is_text_after_last_dot() {
        assert_eq!(extension_of("/a/b.min.js"), "js");
        assert_eq!(extension_of("/favicon.ico"), "ico");
        assert_eq!(extension_of("/noext"), "/noext");
    }
}
