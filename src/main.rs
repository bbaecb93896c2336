use anyhow::Context;
use orgtree::{build_partial, EmployeeRecord, TreeNode};
use std::env;
use std::fs;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let path = env::args().nth(1).context("usage: orgtree <roster.json>")?;
    let raw = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let roster: Vec<EmployeeRecord> =
        serde_json::from_str(&raw).with_context(|| format!("parsing roster {path}"))?;

    let (tree, orphans) = build_partial(&roster)?;

    println!("Orgtree v{}", orgtree::version());
    println!("Organization: {} employees", tree.node_count());
    println!();
    print_tree(&tree);

    if !orphans.is_empty() {
        println!();
        println!("Excluded from the chart (missing supervisor):");
        for orphan in &orphans {
            println!(
                "  employee {} (declared supervisor {})",
                orphan.id, orphan.supervisor
            );
        }
    }

    Ok(())
}

/// Print the chart depth-first, one employee per line
fn print_tree(root: &TreeNode) {
    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        println!(
            "{}{} [{}] rank {}",
            "  ".repeat(depth),
            node.name,
            node.title,
            node.rank
        );
        for child in node.children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }
}
