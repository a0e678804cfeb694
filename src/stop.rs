//! Stop button handling.
//!
//! The button is active-low with the internal pull-up. A press must still
//! read low after the debounce delay to count; contact bounce on release
//! never raises the signal. The render loop polls [`STOP_SIGNAL`] between
//! frames, so a press never interrupts a transfer.

use defmt::info;
use embassy_rp::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Timer;

use crate::config::STOP_DEBOUNCE_MS;

/// Raised once when the stop button is pressed.
pub static STOP_SIGNAL: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Wait for a debounced press, raise [`STOP_SIGNAL`], then exit.
#[embassy_executor::task]
pub async fn stop_button_task(mut button: Input<'static>) {
    info!("Stop button task started");

    loop {
        button.wait_for_falling_edge().await;
        Timer::after_millis(STOP_DEBOUNCE_MS).await;

        if button.is_low() {
            info!("Stop button pressed");
            STOP_SIGNAL.signal(());
            return;
        }
    }
}
