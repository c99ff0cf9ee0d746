//! DOM host for the stack controller
//!
//! Implements [`StackHost`] on top of `web-sys` for a container element
//! found by selector.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlImageElement, Window};

use super::controller::{StackHost, COLUMNS_ATTRIBUTE};
use crate::errors::StackError;
use crate::models::{ItemBox, LeftOffset, StackOptions};

/// A container element and the selector for its items
pub struct DomHost {
    window: Window,
    wrapper: HtmlElement,
    item_selector: String,
}

impl DomHost {
    /// Find the container named by `options.wrapper_selector`
    pub fn locate(options: &StackOptions) -> Result<Self, StackError> {
        let window = web_sys::window().ok_or_else(|| StackError::Dom("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| StackError::Dom("no document".to_string()))?;

        let wrapper = document
            .query_selector(&options.wrapper_selector)
            .map_err(|_| StackError::InvalidSelector(options.wrapper_selector.clone()))?
            .ok_or_else(|| StackError::WrapperNotFound(options.wrapper_selector.clone()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| StackError::WrapperNotFound(options.wrapper_selector.clone()))?;

        Ok(Self {
            window,
            wrapper,
            item_selector: options.item_selector.clone(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn wrapper(&self) -> &HtmlElement {
        &self.wrapper
    }

    /// Scroll height of the root element, 0 when there is none
    pub fn root_scroll_height(&self) -> i32 {
        self.window
            .document()
            .and_then(|d| d.document_element())
            .map(|root| root.scroll_height())
            .unwrap_or(0)
    }

    fn html_elements(
        &self,
        root: &Element,
        selector: &str,
    ) -> Result<Vec<HtmlElement>, StackError> {
        let nodes = root
            .query_selector_all(selector)
            .map_err(|_| StackError::InvalidSelector(selector.to_string()))?;

        Ok((0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect())
    }

    fn computed_px(&self, element: &Element, property: &str) -> f64 {
        let value = self
            .window
            .get_computed_style(element)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value(property).ok());

        match value {
            Some(value) => parse_px(&value),
            None => 0.0,
        }
    }
}

/// Read a CSS pixel length, treating anything unreadable as 0
pub fn parse_px(value: &str) -> f64 {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    match number.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => {
            if !value.is_empty() {
                log::debug!("unreadable length '{}', using 0", value);
            }
            0.0
        }
    }
}

impl StackHost for DomHost {
    type Item = HtmlElement;

    fn items(&self) -> Result<Vec<HtmlElement>, StackError> {
        self.html_elements(&self.wrapper, &self.item_selector)
    }

    fn measure(&self, item: &HtmlElement) -> ItemBox {
        ItemBox {
            natural_top: item.offset_top() as f64,
            natural_left: item.offset_left() as f64,
            outer_height: item.offset_height() as f64,
            margin_bottom: self.computed_px(item, "margin-bottom"),
        }
    }

    fn fix_image_heights(&self, item: &HtmlElement) -> Result<(), StackError> {
        for image in self.html_elements(item, "img")? {
            let Ok(image) = image.dyn_into::<HtmlImageElement>() else {
                continue;
            };
            let style = image.style();
            style
                .set_property("height", "auto")
                .map_err(|e| StackError::dom("image height", e))?;
            style
                .set_property("height", &format!("{}px", image.height() + 1))
                .map_err(|e| StackError::dom("image height", e))?;
        }
        Ok(())
    }

    fn place(&self, item: &HtmlElement, left: &LeftOffset, top: f64) -> Result<(), StackError> {
        let style = item.style();
        style
            .set_property("position", "absolute")
            .and_then(|_| style.set_property("left", &left.to_css()))
            .and_then(|_| style.set_property("top", &format!("{}px", top)))
            .map_err(|e| StackError::dom("place item", e))
    }

    fn resolved_left(&self, item: &HtmlElement) -> Option<String> {
        self.window
            .get_computed_style(item)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("left").ok())
            .filter(|value| !value.is_empty())
    }

    fn clear_placement(&self, item: &HtmlElement) -> Result<(), StackError> {
        let style = item.style();
        for property in ["position", "left", "top"] {
            style
                .remove_property(property)
                .map_err(|e| StackError::dom("clear placement", e))?;
        }
        Ok(())
    }

    fn set_item_class(&self, item: &HtmlElement, class: &str, on: bool) -> Result<(), StackError> {
        toggle_class(item, class, on)
    }

    fn container_width(&self) -> f64 {
        self.wrapper.client_width() as f64
    }

    fn set_container_height(&self, height: Option<f64>) -> Result<(), StackError> {
        let style = self.wrapper.style();
        let result = match height {
            Some(h) => style.set_property("height", &format!("{}px", h)),
            None => style.remove_property("height").map(|_| ()),
        };
        result.map_err(|e| StackError::dom("container height", e))
    }

    fn set_container_class(&self, class: &str, on: bool) -> Result<(), StackError> {
        toggle_class(&self.wrapper, class, on)
    }

    fn column_attribute(&self) -> Option<String> {
        self.wrapper.get_attribute(COLUMNS_ATTRIBUTE)
    }

    fn set_column_attribute(&self, value: Option<&str>) -> Result<(), StackError> {
        let result = match value {
            Some(v) => self.wrapper.set_attribute(COLUMNS_ATTRIBUTE, v),
            None => self.wrapper.remove_attribute(COLUMNS_ATTRIBUTE),
        };
        result.map_err(|e| StackError::dom("column attribute", e))
    }
}

fn toggle_class(element: &Element, class: &str, on: bool) -> Result<(), StackError> {
    let classes = element.class_list();
    let result = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
    result.map_err(|e| StackError::dom("class list", e))
}
