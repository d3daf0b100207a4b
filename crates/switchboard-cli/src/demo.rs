//! Sample command tree for the demo console
//!
//! Exercises the framework surface end to end: subcommand descent,
//! capability-specific executors, argument accessors, the optional and
//! fixed-array combinators, and position-scoped completion.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use switchboard_core::combinators::{completion_at, fixed_array, optional};
use switchboard_core::{Abort, CommandBuilder, CommandNode, TreeError};

type WarpStore = Arc<Mutex<BTreeMap<String, (f64, f64)>>>;

/// Build the demo tree: `greet` and `warp` with `add`/`remove`/`list`/`outline`
pub fn sample_tree() -> Result<CommandNode, TreeError> {
    let warps: WarpStore = Arc::new(Mutex::new(BTreeMap::new()));

    let add_store = Arc::clone(&warps);
    let remove_store = Arc::clone(&warps);
    let remove_completions = Arc::clone(&warps);
    let list_store = Arc::clone(&warps);
    let outline_store = Arc::clone(&warps);

    CommandBuilder::new("warp")
        .alias("w")
        .description("Manage and use saved warp points")
        .usage("/warp <name> | /warp add|remove|list|outline")
        .permission("demo.warp")
        .permission_message("You may not use warps.")
        .only_interactive_message("Only an interactive session can be warped.")
        .interactive_executor(|ctx| {
            let target = ctx
                .arg(0)
                .map_err(|_| Abort::message("Usage: /warp <name>"))?;
            ctx.issuer
                .send_message(&format!("Warping {} to '{}'.", ctx.issuer.name(), target));
            Ok(())
        })
        .child(
            CommandBuilder::new("add")
                .permission("demo.warp.manage")
                .executor(move |ctx| {
                    let name = ctx.arg(0)?.to_string();
                    let x: f64 = ctx.parsed_arg(1)?;
                    let y: f64 = ctx.parsed_arg(2)?;
                    add_store.lock().unwrap().insert(name.clone(), (x, y));
                    ctx.issuer
                        .send_message(&format!("Warp '{}' saved at {}, {}.", name, x, y));
                    Ok(())
                }),
        )
        .child(
            CommandBuilder::new("remove")
                .alias("rm")
                .permission("demo.warp.manage")
                .executor(move |ctx| {
                    let name = ctx.arg(0)?;
                    if remove_store.lock().unwrap().remove(name).is_none() {
                        return Err(Abort::message(format!("No warp named '{}'.", name)));
                    }
                    ctx.issuer.send_message(&format!("Warp '{}' removed.", name));
                    Ok(())
                })
                .completer(move |request| {
                    completion_at(request.args, 0, |current| {
                        remove_completions
                            .lock()
                            .unwrap()
                            .keys()
                            .filter(|name| name.starts_with(current))
                            .cloned()
                            .collect()
                    })
                }),
        )
        .child(CommandBuilder::new("list").executor(move |ctx| {
            let warps = list_store.lock().unwrap();
            if warps.is_empty() {
                ctx.issuer.send_message("No warps saved.");
                return Ok(());
            }
            // Optional page size as a trailing argument
            let limit = optional(|| ctx.parsed_arg::<usize>(0))?.unwrap_or(warps.len());
            for (name, (x, y)) in warps.iter().take(limit) {
                ctx.issuer.send_message(&format!("{} -> {}, {}", name, x, y));
            }
            Ok(())
        }))
        .child(CommandBuilder::new("outline").executor(move |ctx| {
            // A run of `<name> <x> <y>` groups, decoded with stride 3
            if ctx.arg_count() == 0 || ctx.arg_count() % 3 != 0 {
                return Err(Abort::message(
                    "Usage: /warp outline <name> <x> <y> [<name> <x> <y> ...]",
                ));
            }
            let entries = fixed_array(0, ctx.arg_count(), 3, |index| {
                let name = ctx.arg(index)?.to_string();
                let x: f64 = ctx.parsed_arg(index + 1)?;
                let y: f64 = ctx.parsed_arg(index + 2)?;
                Ok((name, (x, y)))
            })?;
            let mut warps = outline_store.lock().unwrap();
            let count = entries.len();
            for (name, point) in entries {
                warps.insert(name, point);
            }
            ctx.issuer
                .send_message(&format!("Outlined {} warp(s).", count));
            Ok(())
        }))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    use switchboard_core::{Issuer, IssuerKind, NoSuggestions};

    struct DemoIssuer {
        kind: IssuerKind,
        messages: Mutex<Vec<String>>,
    }

    impl DemoIssuer {
        fn new(kind: IssuerKind) -> Self {
            Self {
                kind,
                messages: Mutex::new(Vec::new()),
            }
        }

        fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl Issuer for DemoIssuer {
        fn name(&self) -> &str {
            "demo"
        }
        fn kind(&self) -> IssuerKind {
            self.kind
        }
        fn has_permission(&self, _permission: &str) -> bool {
            true
        }
        fn send_message(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_add_then_remove_round_trip() {
        let tree = sample_tree().unwrap();
        let issuer = DemoIssuer::new(IssuerKind::Console);

        tree.dispatch(&issuer, "warp", &args(&["add", "north", "1.5", "-3"]));
        tree.dispatch(&issuer, "warp", &args(&["remove", "north"]));
        tree.dispatch(&issuer, "warp", &args(&["remove", "north"]));

        assert_eq!(
            issuer.messages(),
            vec![
                "Warp 'north' saved at 1.5, -3.".to_string(),
                "Warp 'north' removed.".to_string(),
                "No warp named 'north'.".to_string(),
            ]
        );
    }

    #[test]
    fn test_console_issuer_cannot_use_interactive_root() {
        let tree = sample_tree().unwrap();
        let issuer = DemoIssuer::new(IssuerKind::Console);

        tree.dispatch(&issuer, "warp", &args(&["north"]));

        // `north` matches no child, and the root executor is
        // interactive-only with no default
        assert_eq!(
            issuer.messages(),
            vec!["Only an interactive session can be warped.".to_string()]
        );
    }

    #[test]
    fn test_outline_decodes_groups_of_three() {
        let tree = sample_tree().unwrap();
        let issuer = DemoIssuer::new(IssuerKind::Console);

        tree.dispatch(
            &issuer,
            "warp",
            &args(&["outline", "a", "0", "0", "b", "4", "4"]),
        );
        assert_eq!(issuer.messages(), vec!["Outlined 2 warp(s).".to_string()]);
    }

    #[test]
    fn test_remove_completion_suggests_saved_warps() {
        let tree = sample_tree().unwrap();
        let issuer = DemoIssuer::new(IssuerKind::Interactive);

        tree.dispatch(&issuer, "warp", &args(&["add", "north", "0", "0"]));
        tree.dispatch(&issuer, "warp", &args(&["add", "nether", "8", "8"]));

        let candidates =
            tree.tab_complete(&issuer, "warp", &args(&["remove", "n"]), &NoSuggestions);
        assert_eq!(candidates, args(&["nether", "north"]));
    }
}
