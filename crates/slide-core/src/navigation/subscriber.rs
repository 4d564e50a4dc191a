//! Slider subscriber trait

use crate::events::SliderEvent;

/// Trait for components that react to slider notifications
pub trait SliderSubscriber: Send + Sync {
    /// Called once per published notification
    fn on_slider_event(&self, event: &SliderEvent);
}

/// Helper struct for creating subscribers from closures
struct ClosureSubscriber<F> {
    handler: F,
}

impl<F> SliderSubscriber for ClosureSubscriber<F>
where
    F: Fn(&SliderEvent) + Send + Sync,
{
    fn on_slider_event(&self, event: &SliderEvent) {
        (self.handler)(event);
    }
}

/// Create a subscriber from a closure
pub fn subscriber_from_fn<F>(f: F) -> Box<dyn SliderSubscriber>
where
    F: Fn(&SliderEvent) + Send + Sync + 'static,
{
    Box::new(ClosureSubscriber { handler: f })
}
