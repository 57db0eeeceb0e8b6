#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Aegis console entry point: mounts the app on wasm32, prints the route
//! access table elsewhere.

#[cfg(target_arch = "wasm32")]
fn main() {
    aegis_ui::run_app();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), std::io::Error> {
    use std::io::{self, Write};

    let mut stderr = io::stderr().lock();
    writeln!(
        stderr,
        "aegis-ui renders in the browser; build it with `trunk build`. Route access:"
    )?;
    stderr.write_all(access_table().as_bytes())?;
    Ok(())
}

/// One line per console route: path, whether a session is needed, allowed roles.
#[cfg(not(target_arch = "wasm32"))]
fn access_table() -> String {
    use aegis_ui::core::auth::Role;

    aegis_ui::core::routes::console_routes()
        .routes()
        .iter()
        .map(|route| {
            let roles = if route.required_roles.is_empty() {
                "any".to_string()
            } else {
                route
                    .required_roles
                    .iter()
                    .copied()
                    .map(Role::as_str)
                    .collect::<Vec<_>>()
                    .join(",")
            };
            let auth = if route.requires_auth { "session" } else { "public" };
            format!("{:<12} {auth:<8} {roles}\n", route.path)
        })
        .collect()
}
