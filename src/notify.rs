use std::path::Path;

/// Tells the user how a run ended. Implementations must not expose error details: those
/// belong in the log the failure message points to.
pub trait Notifier {
    fn on_success(&self, output_path: &Path);
    fn on_failure(&self, log_path: &Path);
}

/// Prints the outcome to the terminal.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn on_success(&self, output_path: &Path) {
        println!(
            "SQL Object Extraction Completed Successfully!\nSaved to:\n{}",
            output_path.display()
        );
    }

    fn on_failure(&self, log_path: &Path) {
        eprintln!(
            "Extraction Failed. An error occurred.\nPlease check log file:\n{}",
            log_path.display()
        );
    }
}
