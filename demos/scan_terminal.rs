//! Scan into the terminal and look codes up in a small in-memory catalog.
//!
//! Plug in a keyboard-wedge scanner (or type fast and hit Enter).
//! Esc or Ctrl+C quits.
//!
//! Run with: RUST_LOG=barcode_desk=debug cargo run --example scan_terminal 2>scan.log

use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use barcode_desk::state::{on, poll_event, route_event};
use barcode_desk::{
    allocate, display_code, resolve_with_tier, CatalogEntry, Modifiers, ScannerConfig,
    StreamClassifier,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let catalog = Rc::new(vec![
        CatalogEntry::new("p1", "Beverages").with_code("BEV-001"),
        CatalogEntry::new("p2", "Beverages").with_code("BEV-002"),
        CatalogEntry::new("p3", "Snacks").with_code("4006381333931"),
        CatalogEntry::new("p42", "Dairy"),
    ]);

    print!("catalog:\r\n");
    for entry in catalog.iter() {
        print!("  {:<6} {:<10} {}\r\n", entry.id, entry.category, display_code(entry));
    }
    print!("scan a code (Esc to quit)\r\n");

    let running = Rc::new(Cell::new(true));
    let quit = {
        let running = running.clone();
        on(move |event| {
            let ctrl_c = event.key == "c" && event.modifiers.contains(Modifiers::CTRL);
            if ctrl_c || event.key == "Escape" {
                running.set(false);
                true
            } else {
                false
            }
        })
    };

    let scanner = StreamClassifier::new(ScannerConfig::default());
    let handle = {
        let catalog = catalog.clone();
        scanner.attach(move |code| match resolve_with_tier(code, &catalog) {
            Some(hit) => print!("{code} -> {} ({:?})\r\n", hit.entry.id, hit.tier),
            None => print!(
                "{code} -> unknown; next Beverages code would be {}\r\n",
                allocate("Beverages", &catalog)
            ),
        })
    };

    enable_raw_mode()?;
    let result = (|| -> io::Result<()> {
        while running.get() {
            if let Some(event) = poll_event(Duration::from_millis(16))? {
                route_event(event);
            }
        }
        Ok(())
    })();
    disable_raw_mode()?;

    handle.detach();
    quit();
    result
}
