//! `abiprobe table` — list the classification tables.

use anyhow::{bail, Result};

use abiprobe_core::{Classified, Table, ABI_TABLE, OS_TABLE};

/// Print the OS table, the ABI table, or both.
pub fn run(kind: Option<&str>) -> Result<()> {
    match kind {
        None => {
            print_table("OS", &OS_TABLE);
            println!();
            print_table("ABI", &ABI_TABLE);
        }
        Some("os") => print_table("OS", &OS_TABLE),
        Some("abi") => print_table("ABI", &ABI_TABLE),
        Some(other) => bail!("unknown table '{other}' (expected os or abi)"),
    }
    Ok(())
}

fn print_table<V: Classified>(title: &str, table: &Table<V>) {
    println!("{title} tokens (from {}):", table.header());
    for line in table_lines(table) {
        println!("  {line}");
    }
}

fn table_lines<V: Classified>(table: &Table<V>) -> Vec<String> {
    table
        .entries()
        .iter()
        .map(|e| {
            let note = if e.is_alias() { "  (known, unsupported)" } else { "" };
            format!(
                "{:<18} {:<18} since v{}{note}",
                e.raw,
                e.value.symbol(),
                e.value.introduced()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_row() {
        assert_eq!(table_lines(&ABI_TABLE).len(), ABI_TABLE.entries().len());
        let lines = table_lines(&ABI_TABLE);
        let x86 = lines.iter().find(|l| l.starts_with("linux_x86 ")).unwrap();
        assert!(x86.contains("Linux_x86"));
        assert!(x86.contains("since v2"));
        let ppc = lines.iter().find(|l| l.starts_with("darwin_ppc64")).unwrap();
        assert!(ppc.contains("known, unsupported"));
    }

    #[test]
    fn kinds() {
        assert!(run(None).is_ok());
        assert!(run(Some("os")).is_ok());
        assert!(run(Some("cpu")).is_err());
    }
}
