//! Interactive driver for the shortcut engine.
//!
//! Each stdin line is a key chord (`ctrl+k`, `g`, `?`, `shift+/`) that is
//! synthesized into a keydown and emitted through the mounted event
//! source. Prefix a chord with `:input ` to simulate typing inside a text
//! field. `:list` prints the current registry, `:tick` sweeps deadlines,
//! `:quit` exits.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use docs_keys::{
    Config, EventTarget, KeyCombo, KeyEvent, Platform, ShortcutProvider, SyntheticEventSource,
    parse_key_combo,
};

fn main() -> Result<()> {
    env_logger::init();

    let source = SyntheticEventSource::new();
    let mut provider = ShortcutProvider::new(source.clone(), Platform::host());
    provider.apply_config(&Config::load());

    provider.set_search_focus_callback(|| println!("  -> search focused"));
    provider.set_sidebar_toggle_callback(|| println!("  -> sidebar toggled"));
    provider.set_navigation_callbacks(
        || println!("  -> moved to previous item"),
        || println!("  -> moved to next item"),
    );
    provider.set_route_navigator(|route| println!("  -> navigate to {route}"));
    provider.mount();

    println!(
        "docs-keys demo ({} platform). Type chords like 'ctrl+k', 'g' then 'h', or '?'.",
        if provider.is_mac() { "mac" } else { "non-mac" }
    );
    println!("Commands: :list, :tick, :quit. Prefix with ':input ' to type in a field.");

    let stdin = io::stdin();
    loop {
        print!("keys> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read stdin")?
            == 0
        {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            ":quit" | ":q" => break,
            ":list" => print_registry(&provider),
            ":tick" => {
                provider.tick();
                print_state(&provider);
            }
            chord => feed(&provider, &source, chord),
        }
    }

    provider.unmount();
    Ok(())
}

/// Parse one chord line, synthesize the keydown, and emit it.
fn feed(
    provider: &ShortcutProvider<SyntheticEventSource>,
    source: &SyntheticEventSource,
    chord: &str,
) {
    let (target, chord) = match chord.strip_prefix(":input ") {
        Some(rest) => (Some(EventTarget::element("input")), rest.trim()),
        None => (None, chord),
    };

    let combo = match parse_key_combo(chord) {
        Ok(combo) => combo,
        Err(err) => {
            println!("  !! {err}");
            return;
        }
    };

    let mut event = event_from_combo(&combo, target);
    source.emit(&mut event);
    log::debug!("emitted {chord}, handled: {}", event.default_prevented());
    print_state(provider);
}

fn event_from_combo(combo: &KeyCombo, target: Option<EventTarget>) -> KeyEvent {
    let mut event = KeyEvent::new(combo.key.clone());
    if combo.ctrl {
        event = event.with_ctrl();
    }
    if combo.cmd {
        event = event.with_meta();
    }
    if combo.shift {
        event = event.with_shift();
    }
    if combo.alt {
        event = event.with_alt();
    }
    match target {
        Some(target) => event.with_target(target),
        None => event,
    }
}

fn print_state(provider: &ShortcutProvider<SyntheticEventSource>) {
    let sequence = provider.key_sequence();
    if !sequence.is_empty() {
        println!("  .. pending sequence: {}", sequence.join(" "));
    }
    if let Some(toast) = provider.toast() {
        println!("  .. toast: {toast}");
    }
    if provider.is_help_open() {
        println!("  .. help overlay is open (enter ':quit' or keep typing)");
        provider.set_help_open(false);
        print_registry(provider);
    }
}

fn print_registry(provider: &ShortcutProvider<SyntheticEventSource>) {
    println!("  {} registered shortcuts:", provider.shortcut_count());
    for shortcut in provider.shortcuts() {
        println!(
            "    {:<12} {:<14} {}",
            provider.format_shortcut(&shortcut),
            shortcut.category_or_default(),
            shortcut.description
        );
    }
    println!("    {:<12} {:<14} {}", "G H/D/E", "Navigation", "Go to page");
    println!("    {:<12} {:<14} {}", "?", "General", "Show this help");
}
