use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use futures::channel::oneshot;
use trip_dispatch_lib::location::Location;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Position, PositionError};

// PositionError.code value for a rejected permission prompt.
const PERMISSION_DENIED: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleError {
    /// No geolocation capability, or the browser could not produce a fix.
    Unavailable,
    /// The user rejected the permission prompt.
    Denied,
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleError::Unavailable => write!(f, "geolocation unavailable"),
            SampleError::Denied => write!(f, "geolocation permission denied"),
        }
    }
}

/// One coordinate sample from the browser, rounded at this boundary.
/// Triggers the native permission prompt on first use. No retry policy,
/// the caller decides what a failure means.
pub async fn sample() -> Result<Location, SampleError> {
    let geolocation = gloo_utils::window()
        .navigator()
        .geolocation()
        .map_err(|_| SampleError::Unavailable)?;

    let (tx, rx) = oneshot::channel();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let on_success = {
        let sender = sender.clone();
        Closure::<dyn FnMut(Position)>::new(move |position: Position| {
            let coords = position.coords();
            let location = Location::from_raw(coords.latitude(), coords.longitude());
            if let Some(tx) = sender.borrow_mut().take() {
                let _ = tx.send(Ok(location));
            }
        })
    };

    let on_error = {
        let sender = sender.clone();
        Closure::<dyn FnMut(PositionError)>::new(
            move |err: PositionError| {
                let outcome = if err.code() == PERMISSION_DENIED {
                    SampleError::Denied
                } else {
                    SampleError::Unavailable
                };
                if let Some(tx) = sender.borrow_mut().take() {
                    let _ = tx.send(Err(outcome));
                }
            },
        )
    };

    geolocation
        .get_current_position_with_error_callback(
            on_success.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
        )
        .map_err(|_| SampleError::Unavailable)?;

    // The closures stay alive on this frame until one of them resolves the
    // channel.
    rx.await.unwrap_or(Err(SampleError::Unavailable))
}
