//! Wire protocol for the correction server.
//!
//! Every message is a single frame: one length byte followed by that many
//! bytes of UTF-8 text. A frame with length zero is the empty reply, used
//! when no correction exists. Requests are a command name and one word,
//! separated by whitespace:
//!
//! ```text
//! CHECK word      -> "OK" | "ERROR"
//! CORRECT word    -> corrected word | empty frame
//! PROCESS word    -> "OK" | "WRONG suggestion" | "WRONG "
//! ```

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::checker::Verdict;
use crate::error::{CorrigoError, Result};

/// Largest payload a single frame can carry.
pub const MAX_PAYLOAD: usize = 255;

/// Default server port.
pub const DEFAULT_PORT: u16 = 9000;

/// Read one length-prefixed frame.
pub async fn read_frame<R>(reader: &mut R) -> Result<String>
where
    R: AsyncRead + Unpin,
{
    let length = reader.read_u8().await?;
    let mut payload = vec![0u8; length as usize];
    reader.read_exact(&mut payload).await?;
    String::from_utf8(payload)
        .map_err(|_| CorrigoError::protocol("frame payload is not valid UTF-8"))
}

/// Write one length-prefixed frame.
pub async fn write_frame<W>(writer: &mut W, payload: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let bytes = payload.as_bytes();
    if bytes.len() > MAX_PAYLOAD {
        return Err(CorrigoError::protocol(format!(
            "payload of {} bytes exceeds the frame limit",
            bytes.len()
        )));
    }
    writer.write_u8(bytes.len() as u8).await?;
    writer.write_all(bytes).await?;
    writer.flush().await?;
    Ok(())
}

/// A parsed client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Check(String),
    Correct(String),
    Process(String),
}

impl Request {
    /// Parse a request message of the form `COMMAND word`.
    pub fn parse(message: &str) -> Result<Request> {
        let mut parts = message.split_whitespace();
        let command = parts
            .next()
            .ok_or_else(|| CorrigoError::protocol("empty request"))?;
        let word = parts
            .next()
            .ok_or_else(|| CorrigoError::protocol(format!("{command} requires a word")))?
            .to_string();
        if parts.next().is_some() {
            return Err(CorrigoError::protocol(format!(
                "{command} takes exactly one word"
            )));
        }

        match command {
            "CHECK" => Ok(Request::Check(word)),
            "CORRECT" => Ok(Request::Correct(word)),
            "PROCESS" => Ok(Request::Process(word)),
            _ => Err(CorrigoError::protocol(format!(
                "unknown command: {command}"
            ))),
        }
    }
}

/// Render a check outcome.
pub fn render_check(found: bool) -> &'static str {
    if found { "OK" } else { "ERROR" }
}

/// Render a correction outcome. No correction renders as the empty reply.
pub fn render_correct(correction: Option<&str>) -> String {
    correction.unwrap_or_default().to_string()
}

/// Render a process verdict. A miss with no suggestion keeps the bare
/// `WRONG ` form so clients can always split on the first space.
pub fn render_process(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Ok => "OK".to_string(),
        Verdict::Wrong(Some(word)) => format!("WRONG {word}"),
        Verdict::Wrong(None) => "WRONG ".to_string(),
    }
}
