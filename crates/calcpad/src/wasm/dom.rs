//! Mock DOM for testing the widget without a browser
//!
//! Holds an element registry, the document root's theme classes, and the
//! window's keydown listeners, so keypad wiring can be exercised natively.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::accumulator::EMPTY_DISPLAY;
use crate::theme::{slider_labels, ThemeName};

use super::keypad::KEYPAD_BUTTONS;

/// Element ID of the display output
pub const DISPLAY_ID: &str = "display";
/// Element ID of the keypad container
pub const KEYPAD_ID: &str = "keypad";
/// Element ID of the theme range input
pub const THEME_RANGE_ID: &str = "theme-range";

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Inline style properties
    pub style: HashMap<String, String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            style: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Adds a class if absent
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Sets or clears an inline style property
    pub fn set_style(&mut self, property: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                self.style.insert(property.to_string(), value.to_string());
            }
            None => {
                self.style.remove(property);
            }
        }
    }

    /// Gets an inline style property
    #[must_use]
    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// Depth-first search for a descendant (or self) by ID
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&DomElement> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

/// DOM events recorded by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Input event with new value
    Input {
        /// The ID of the input element
        element_id: String,
        /// The new value entered
        value: String,
    },
    /// Window keydown
    KeyDown {
        /// Key name as a browser reports it
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates an input event
    #[must_use]
    pub fn input(element_id: &str, value: &str) -> Self {
        Self::Input {
            element_id: element_id.to_string(),
            value: value.to_string(),
        }
    }

    /// Creates a keydown event
    #[must_use]
    pub fn key_down(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
        }
    }
}

/// Keydown event passed to window listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// Key name, e.g. `"5"`, `"Enter"`, `"Backspace"`
    pub key: String,
    default_prevented: bool,
}

impl KeyboardEvent {
    /// Creates a keydown event
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            default_prevented: false,
        }
    }

    /// Suppresses the host's default action
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a listener suppressed the default action
    #[must_use]
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Handle for a registered keydown listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type KeydownListener = Rc<dyn Fn(&mut KeyboardEvent)>;

/// Mock DOM for testing the widget without a browser
pub struct MockDom {
    /// Root element as originally built
    pub root: DomElement,
    /// The `<html>` element; theme classes live here
    document_element: DomElement,
    elements: HashMap<String, DomElement>,
    event_history: Vec<DomEvent>,
    keydown_listeners: Vec<(ListenerId, KeydownListener)>,
    next_listener_id: u64,
}

impl fmt::Debug for MockDom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockDom")
            .field("root", &self.root.id)
            .field("document_classes", &self.document_element.classes)
            .field("elements", &self.elements.len())
            .field("event_history", &self.event_history.len())
            .field("keydown_listeners", &self.keydown_listeners.len())
            .finish()
    }
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: DomElement::new("div").with_id("root"),
            document_element: DomElement::new("html"),
            elements: HashMap::new(),
            event_history: Vec::new(),
            keydown_listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Creates the calculator widget structure
    #[must_use]
    pub fn calculator() -> Self {
        let mut dom = Self::new();

        let title = DomElement::new("h1").with_class("title").with_text("calc");

        let mut labels = DomElement::new("div").with_class("theme-labels");
        for label in slider_labels() {
            labels = labels.with_child(
                DomElement::new("span")
                    .with_class("theme-label")
                    .with_text(&label),
            );
        }
        let max_index = (ThemeName::AVAILABLE.len() - 1).to_string();
        let range = DomElement::new("input")
            .with_id(THEME_RANGE_ID)
            .with_attr("type", "range")
            .with_attr("min", "0")
            .with_attr("max", &max_index)
            .with_attr("step", "1")
            .with_attr("value", "0");
        let slider = DomElement::new("div")
            .with_id("theme-slider")
            .with_class("theme-slider")
            .with_child(
                DomElement::new("span")
                    .with_class("theme-slider-title")
                    .with_text("Theme"),
            )
            .with_child(labels)
            .with_child(range.clone());

        let header = DomElement::new("header")
            .with_class("header")
            .with_child(title)
            .with_child(slider.clone());

        let display = DomElement::new("output")
            .with_id(DISPLAY_ID)
            .with_class("display")
            .with_attr("role", "status")
            .with_attr("aria-live", "polite")
            .with_text(EMPTY_DISPLAY);

        let buttons: Vec<DomElement> = KEYPAD_BUTTONS.iter().map(|b| b.to_element()).collect();
        let mut keypad = DomElement::new("div").with_id(KEYPAD_ID).with_class("keypad");
        for button in &buttons {
            keypad = keypad.with_child(button.clone());
        }

        dom.root = DomElement::new("main")
            .with_id("calculator")
            .with_class("calculator")
            .with_child(header)
            .with_child(display.clone())
            .with_child(keypad.clone());

        dom.register_element(slider);
        dom.register_element(range);
        dom.register_element(display);
        dom.register_element(keypad);
        for button in buttons {
            dom.register_element(button);
        }

        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// The `<html>` element
    #[must_use]
    pub const fn document_element(&self) -> &DomElement {
        &self.document_element
    }

    /// Replaces any theme class on `<html>` with `theme`
    pub fn apply_theme_class(&mut self, theme: ThemeName) {
        for name in ThemeName::AVAILABLE {
            self.document_element.remove_class(name.as_str());
        }
        self.document_element.add_class(theme.as_str());
    }

    /// Records an event and applies its direct effect on element state
    pub fn dispatch_event(&mut self, event: DomEvent) {
        if let DomEvent::Input { element_id, value } = &event {
            if let Some(elem) = self.elements.get_mut(element_id) {
                elem.attributes.insert("value".to_string(), value.clone());
            }
        }
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Registers a window keydown listener
    pub fn add_keydown_listener(
        &mut self,
        listener: impl Fn(&mut KeyboardEvent) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.keydown_listeners.push((id, Rc::new(listener)));
        id
    }

    /// Removes a keydown listener; returns false if it was not registered
    pub fn remove_keydown_listener(&mut self, id: ListenerId) -> bool {
        let before = self.keydown_listeners.len();
        self.keydown_listeners.retain(|(lid, _)| *lid != id);
        self.keydown_listeners.len() != before
    }

    /// Number of registered keydown listeners
    #[must_use]
    pub fn keydown_listener_count(&self) -> usize {
        self.keydown_listeners.len()
    }

    /// Dispatches a keydown to every listener and returns the event
    pub fn dispatch_keydown(&mut self, key: &str) -> KeyboardEvent {
        self.event_history.push(DomEvent::key_down(key));
        let mut event = KeyboardEvent::new(key);
        for (_, listener) in &self.keydown_listeners {
            listener(&mut event);
        }
        event
    }
}
