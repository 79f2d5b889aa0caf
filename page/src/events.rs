//! The registration table of the page's event handlers.
//!
//! Behaviors don't add listeners themselves: they register handlers here, keyed
//! by event source and event kind. The table is then attached to a [Host], or
//! driven directly with [EventRegistry::dispatch].

use std::rc::Rc;

use tracing::debug;

use crate::host::EventKind;
use crate::host::EventSource;
use crate::host::Handler;
use crate::host::Host;
use crate::host::HostError;
use crate::host::PageElement;
use crate::host::PageEvent;

pub struct EventRegistry<E> {
    registrations: Vec<Registration<E>>,
}

struct Registration<E> {
    source: EventSource<E>,
    kind: EventKind,
    handler: Handler,
}

impl<E: PageElement> EventRegistry<E> {
    pub fn on(
        &mut self,
        source: EventSource<E>,
        kind: EventKind,
        handler: impl Fn(&PageEvent) + 'static,
    ) -> &mut Self {
        self.registrations.push(Registration {
            source,
            kind,
            handler: Rc::new(handler),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Number of handlers registered for the source and kind.
    pub fn count(&self, source: &EventSource<E>, kind: EventKind) -> usize {
        self.matching(source, kind).count()
    }

    /// Runs the handlers registered for the source and kind, in registration
    /// order, without any host.
    pub fn dispatch(&self, source: &EventSource<E>, kind: EventKind) -> PageEvent {
        let event = PageEvent::new(kind);
        for registration in self.matching(source, kind) {
            (registration.handler)(&event);
        }
        event
    }

    /// Installs every handler on the host.
    pub fn attach<H: Host<Element = E>>(&self, host: &H) -> Result<(), HostError> {
        for registration in &self.registrations {
            host.listen(
                &registration.source,
                registration.kind,
                registration.handler.clone(),
            )?;
        }
        debug!(count = self.registrations.len(), "Attached event handlers");
        Ok(())
    }

    fn matching<'t>(
        &'t self,
        source: &'t EventSource<E>,
        kind: EventKind,
    ) -> impl Iterator<Item = &'t Registration<E>> + 't {
        self.registrations
            .iter()
            .filter(move |registration| registration.kind == kind && &registration.source == source)
    }
}

impl<E> Default for EventRegistry<E> {
    fn default() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }
}

impl<E> std::fmt::Debug for EventRegistry<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("registrations", &self.registrations.len())
            .finish()
    }
}
