// Copyright 2026 Daniel Smith
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! rawrepl demo - echoes each submitted line back as `handler[<line>]`.
//!
//! A line counts as a complete command when it matches the completion
//! pattern (default: ends with `;`); otherwise the continuation prompt is
//! shown for the next line.

use std::process;

use regex::Regex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rawrepl::{Handler, Outcome, Repl, ReplConfig, ReplError, term};

// ---------------------------------------------------------------------------
// Demo handler
// ---------------------------------------------------------------------------

struct EchoHandler {
    complete_when: Regex,
}

impl Handler for EchoHandler {
    fn handle(&mut self, line: &str) -> Outcome {
        Outcome {
            complete: self.complete_when.is_match(line),
            output: format!("handler[{}]", line),
        }
    }
}

// ---------------------------------------------------------------------------
// Usage
// ---------------------------------------------------------------------------

fn print_usage() {
    let usage = [
        "usage: rawrepl -p<prompt> -q<prompt> -x<exit> -n<number> -c<regex> -h --version",
        "       -p<prompt>           primary prompt (default: REPL>)",
        "       -q<prompt>           continuation prompt after an incomplete command (default: ....>)",
        "       -x<command>          command that ends the session (default: exit)",
        "       -n<number>           number of history entries to keep (default: 5)",
        "       -c<regex>            a line matching this is a complete command (default: ;$)",
        "       -h                   help screen",
        "       --version            show version and exit",
        "",
        "keys: left/right, ESC ESC [ D / C word left/right, Ctrl-A home, Ctrl-E end,",
        "      Ctrl-U clear to start, up/down history, backspace",
        "",
        "RUST_LOG=rawrepl=debug rawrepl 2>trace.log   log to a file while editing",
    ];
    for line in &usage {
        eprintln!("{}", line);
    }
}

// ---------------------------------------------------------------------------
// Arg parsing
// ---------------------------------------------------------------------------

fn fail(msg: &str) -> ! {
    eprintln!("{}", msg);
    process::exit(255);
}

/// Value for a single-letter flag: glued on (`-pdb>`) or the next argument
/// (`-p db>`).
fn flag_value(inline: &str, args: &mut impl Iterator<Item = String>, missing: &str) -> String {
    if inline.is_empty() {
        args.next().unwrap_or_else(|| fail(missing))
    } else {
        inline.to_string()
    }
}

fn parse_args() -> (ReplConfig, Regex) {
    let mut config = ReplConfig::default();
    let mut complete_pattern = String::from(";$");
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        if arg == "--version" {
            eprintln!("rawrepl {}", env!("CARGO_PKG_VERSION"));
            process::exit(0);
        }
        let Some(body) = arg.strip_prefix('-') else {
            print_usage();
            process::exit(255);
        };
        let mut chars = body.chars();
        let flag = chars.next();
        let inline = chars.as_str();
        match flag {
            Some('p') => config.prompt = flag_value(inline, &mut args, "-p option: need a prompt"),
            Some('q') => {
                config.continuation_prompt =
                    flag_value(inline, &mut args, "-q option: need a prompt");
            }
            Some('x') => {
                config.exit_command = flag_value(inline, &mut args, "-x option: need an exit command");
            }
            Some('n') => {
                let val = flag_value(inline, &mut args, "-n option: need a number");
                config.max_history = val.parse::<usize>().unwrap_or(0);
            }
            Some('c') => complete_pattern = flag_value(inline, &mut args, "-c option: need a pattern"),
            _ => {
                print_usage();
                process::exit(255);
            }
        }
    }

    if let Err(e) = config.validate() {
        fail(&format!("rawrepl: {}", e));
    }
    let complete_when = Regex::new(&complete_pattern)
        .unwrap_or_else(|e| fail(&format!("-c option: {}", e)));
    (config, complete_when)
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Reads `RUST_LOG`; off by default so nothing interleaves with the edited
/// line. Output goes to stderr.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

fn setup_signals() {
    unsafe {
        libc::signal(libc::SIGINT, signal_handler as libc::sighandler_t);
        libc::signal(libc::SIGQUIT, signal_handler as libc::sighandler_t);
        libc::signal(libc::SIGTSTP, signal_handler as libc::sighandler_t);
    }
}

extern "C" fn signal_handler(sig: libc::c_int) {
    term::restore_saved();
    unsafe {
        libc::_exit(128 + sig);
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let (config, complete_when) = parse_args();
    init_logging();

    let mut repl = Repl::new(config, EchoHandler { complete_when })
        .unwrap_or_else(|e| fail(&format!("rawrepl: {}", e)));

    // Install cleanup on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        term::restore_saved();
        default_hook(info);
    }));

    setup_signals();

    match repl.run_stdio() {
        Ok(()) => {}
        Err(ReplError::Eof) => println!(),
        Err(e) => fail(&format!("rawrepl: {}", e)),
    }
}
