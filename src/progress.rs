//! Progress-reporting stream wrappers.
//!
//! Each wrapper counts the bytes moving through it and invokes a
//! caller-supplied callback with the cumulative total, never the delta.
//! The wrappers are purely additive instrumentation: no buffering, no
//! retries, no alteration of the underlying transfer.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

/// Callback invoked with cumulative bytes transferred.
///
/// Runs inline on the transferring task after every chunk, so it must not
/// block indefinitely.
pub type ProgressCallback = Box<dyn FnMut(u64) + Send>;

/// Wraps an [`AsyncRead`] and reports cumulative bytes read. Used for
/// upload bodies.
pub struct ProgressReader<R> {
    inner: R,
    callback: Option<ProgressCallback>,
    transferred: u64,
}

impl<R> ProgressReader<R> {
    pub fn new(inner: R, callback: Option<ProgressCallback>) -> Self {
        Self {
            inner,
            callback,
            transferred: 0,
        }
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for ProgressReader<R> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let filled_before = buf.filled().len();
        let me = &mut *self;
        match Pin::new(&mut me.inner).poll_read(cx, buf) {
            Poll::Ready(Ok(())) => {
                let n = buf.filled().len() - filled_before;
                if n > 0 {
                    me.transferred += n as u64;
                    if let Some(callback) = me.callback.as_mut() {
                        callback(me.transferred);
                    }
                }
                Poll::Ready(Ok(()))
            }
            other => other,
        }
    }
}

/// Wraps an [`AsyncWrite`] and reports cumulative bytes written. Used for
/// download sinks.
pub struct ProgressWriter<W> {
    inner: W,
    callback: Option<ProgressCallback>,
    transferred: u64,
}

impl<W> ProgressWriter<W> {
    pub fn new(inner: W, callback: Option<ProgressCallback>) -> Self {
        Self {
            inner,
            callback,
            transferred: 0,
        }
    }
}

impl<W: AsyncWrite + Unpin> AsyncWrite for ProgressWriter<W> {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let me = &mut *self;
        match Pin::new(&mut me.inner).poll_write(cx, buf) {
            Poll::Ready(Ok(n)) => {
                if n > 0 {
                    me.transferred += n as u64;
                    if let Some(callback) = me.callback.as_mut() {
                        callback(me.transferred);
                    }
                }
                Poll::Ready(Ok(n))
            }
            other => other,
        }
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_shutdown(cx)
    }
}
