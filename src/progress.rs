// src/progress.rs
/// Progress reporting for the long-running engines (crawl, repair, extract).
/// Frontends implement this to surface status; the CLI prints lines.
pub trait Progress {
    /// Called at the start with the total number of items, when known.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One item (a listing, or a region for the crawl) completed.
    fn item_done(&mut self, _item: &str) {}

    /// One item failed; the run goes on.
    fn item_failed(&mut self, _item: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints to stdout/stderr, one line per event.
#[derive(Default)]
pub struct ConsoleProgress {
    total: Option<usize>,
    done: usize,
    failed: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = Some(total);
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, item: &str) {
        self.done += 1;
        match self.total {
            Some(t) => println!("[{}/{}] {item}", self.done + self.failed, t),
            None => println!("{item}"),
        }
    }

    fn item_failed(&mut self, item: &str, reason: &str) {
        self.failed += 1;
        eprintln!("Error: {item}: {reason}");
    }

    fn finish(&mut self) {
        println!("Done: {} ok, {} failed", self.done, self.failed);
    }
}
