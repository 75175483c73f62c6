//! Binary entry point: stdin protocol loop with pondering.
//!
//! Two threads share a mutex-protected line queue: a reader thread that
//! drains standard input, and this main thread, which handles lines and,
//! whenever the queue is idle on the opponent's turn, searches the expected
//! replies, stopping the moment new input shows up.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::info;

use hexchess::protocol::session::{DEFAULT_PONDER_NODES, DEFAULT_SEARCH_NODES};
use hexchess::protocol::{Session, SessionConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Hexagonal chess engine (Glinski, McCooey, Hexofen)", long_about = None)]
struct Args {
    /// Node budget for each reply search
    #[arg(long, default_value_t = DEFAULT_SEARCH_NODES)]
    search_nodes: u64,

    /// Node budget while pondering on the opponent's time
    #[arg(long, default_value_t = DEFAULT_PONDER_NODES)]
    ponder_nodes: u64,

    /// Directory for GEXF search-tree exports
    #[arg(long, default_value = "gexf_exports")]
    export_dir: PathBuf,

    /// Disable GEXF exports entirely
    #[arg(long)]
    no_export: bool,
}

/// Lines from stdin, shared between the reader thread and the main loop.
#[derive(Default)]
struct InputQueue {
    lines: Mutex<VecDeque<String>>,
    done: AtomicBool,
}

impl InputQueue {
    fn push(&self, line: String) {
        self.lines
            .lock()
            .expect("input queue mutex poisoned")
            .push_back(line);
    }

    fn pop(&self) -> Option<String> {
        self.lines
            .lock()
            .expect("input queue mutex poisoned")
            .pop_front()
    }

    fn has_input(&self) -> bool {
        !self
            .lines
            .lock()
            .expect("input queue mutex poisoned")
            .is_empty()
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = SessionConfig {
        search_nodes: args.search_nodes,
        ponder_nodes: args.ponder_nodes,
        export_dir: if args.no_export {
            None
        } else {
            Some(args.export_dir.clone())
        },
    };
    if let Some(dir) = &config.export_dir {
        info!("gexf exports go to {}", dir.display());
    }

    let queue = Arc::new(InputQueue::default());
    let quit = Arc::new(AtomicBool::new(false));

    {
        let queue = Arc::clone(&queue);
        let quit = Arc::clone(&quit);
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(mut line) = line else {
                    break;
                };
                while line.ends_with('\r') {
                    line.pop();
                }
                queue.push(line);
                if quit.load(Ordering::Relaxed) {
                    break;
                }
            }
            queue.done.store(true, Ordering::Relaxed);
        });
    }

    let mut session = Session::new(config);
    let stdout = io::stdout();

    loop {
        let Some(line) = queue.pop() else {
            if queue.done.load(Ordering::Relaxed) {
                break;
            }
            if session.can_ponder() {
                // Reclaim the opponent's thinking time; stop as soon as a
                // line arrives or we are asked to quit.
                let stop_queue = Arc::clone(&queue);
                let stop_quit = Arc::clone(&quit);
                session.ponder(move || {
                    stop_queue.has_input() || stop_quit.load(Ordering::Relaxed)
                });
            } else {
                thread::sleep(Duration::from_millis(10));
            }
            continue;
        };

        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }

        let mut out = stdout.lock();
        if session.handle_line(&line, &mut out).is_err() {
            break;
        }
        let _ = out.flush();
    }

    quit.store(true, Ordering::Relaxed);
    // The reader thread may be blocked on stdin; it dies with the process.
}
