//! SMTP session: line framing, the reply-driven state machine, and the async
//! loop that connects them to a live transport.

mod framer;
mod machine;

pub use framer::{LineBuffer, MAX_LINE_LENGTH};
pub use machine::{Outcome, Session, Transition};

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{Error, Result};

/// Drives `session` over `stream` until it reaches a terminal outcome.
///
/// Each complete inbound line is fed to the state machine and any output is
/// written before the next line is examined. Every read and every write is
/// bounded by `idle_timeout`; when it expires the dialog fails with
/// [`Error::Timeout`].
///
/// The stream is left open; closing it is the caller's job.
///
/// # Errors
///
/// Returns the session's failure, a timeout, an I/O error, or
/// [`Error::ConnectionClosed`] if the peer hangs up first.
pub async fn drive<S>(stream: &mut S, session: &mut Session, idle_timeout: Duration) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buffer = LineBuffer::new();
    let mut chunk = vec![0u8; framer::DEFAULT_BUFFER_SIZE];

    loop {
        while let Some(line) = buffer.next_line() {
            let transition = session.on_line(&line);

            if let Some(output) = transition.output {
                write_with_deadline(stream, &output, idle_timeout).await?;
            }

            match transition.outcome {
                Some(Outcome::Delivered) => return Ok(()),
                Some(Outcome::Failed(error)) => return Err(error),
                None => {}
            }
        }

        let read = tokio::time::timeout(idle_timeout, stream.read(&mut chunk))
            .await
            .map_err(|_| Error::Timeout(idle_timeout))??;

        if read == 0 {
            tracing::debug!(pending = buffer.pending(), "peer closed connection");
            return Err(Error::ConnectionClosed);
        }

        buffer.extend(&chunk[..read])?;
    }
}

/// Writes and flushes `output`, failing if the peer stops draining it.
async fn write_with_deadline<S>(stream: &mut S, output: &[u8], deadline: Duration) -> Result<()>
where
    S: AsyncWrite + Unpin,
{
    tokio::time::timeout(deadline, async {
        stream.write_all(output).await?;
        stream.flush().await
    })
    .await
    .map_err(|_| Error::Timeout(deadline))??;

    Ok(())
}
