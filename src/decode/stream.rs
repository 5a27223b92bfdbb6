use crate::decode::{DecodedEvent, FrameDecoder};
use crate::errors::StreamError;
use bytes::Bytes;
use futures::Stream;
use pin_project_lite::pin_project;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// Pull-based surface over a raw byte stream: decodes chunks as they
    /// are polled and yields one item per classified event. Terminates on
    /// the completion sentinel (after draining the events of that pass) or
    /// when the inner stream ends.
    pub struct DecodedStream<S, D: FrameDecoder> {
        #[pin]
        inner: S,
        decoder: D,
        ready: VecDeque<Result<D::Output, StreamError>>,
        finished: bool,
    }
}

impl<S, D> DecodedStream<S, D>
where
    S: Stream<Item = Result<Bytes, StreamError>>,
    D: FrameDecoder,
{
    pub fn new(inner: S, decoder: D) -> Self {
        Self {
            inner,
            decoder,
            ready: VecDeque::new(),
            finished: false,
        }
    }
}

impl<S, D> Stream for DecodedStream<S, D>
where
    S: Stream<Item = Result<Bytes, StreamError>>,
    D: FrameDecoder,
{
    type Item = Result<D::Output, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(item) = this.ready.pop_front() {
                return Poll::Ready(Some(item));
            }
            if *this.finished {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    let pass = this.decoder.feed(chunk);
                    for event in pass.events {
                        match event {
                            DecodedEvent::Payload(payload) => this.ready.push_back(Ok(payload)),
                            DecodedEvent::Error(e) => this.ready.push_back(Err(e)),
                            DecodedEvent::Completed(_) => {}
                        }
                    }
                    if pass.saw_done {
                        this.decoder.finish();
                        *this.finished = true;
                    }
                }
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    this.decoder.finish();
                    *this.finished = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
