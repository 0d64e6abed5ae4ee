use crate::cli::Input;
use std::io::Read;

/// Read a whole document from a file or stdin.
pub fn read_to_string(input: &Input) -> anyhow::Result<String> {
    match input {
        Input::Stdin => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| anyhow::anyhow!("failed to read stdin: {e}"))?;
            Ok(buf)
        }
        Input::File(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display())),
    }
}
