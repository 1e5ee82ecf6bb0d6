//! UI collaborator
//!
//! The host resolves pointer hit-testing and reports which menu button is hot
//! or was clicked; the menu tick asks for activations through [`UiState::do_button`].

use glam::IVec2;

use crate::assets::SpriteId;
use crate::render::DrawData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuButton {
    PlayLevel1,
    PlayLevel2,
}

/// A widget queued for drawing this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiElement {
    pub button: MenuButton,
    pub sprite: SpriteId,
    pub pos: IVec2,
    pub draw_data: DrawData,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Button under the pointer
    pub hot: Option<MenuButton>,
    /// Button released over since the last tick
    pub clicked: Option<MenuButton>,
    pub elements: Vec<UiElement>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hot(&self, button: MenuButton) -> bool {
        self.hot == Some(button)
    }

    /// Queue a button and report whether it was activated
    pub fn do_button(
        &mut self,
        button: MenuButton,
        sprite: SpriteId,
        pos: IVec2,
        draw_data: DrawData,
    ) -> bool {
        self.elements.push(UiElement {
            button,
            sprite,
            pos,
            draw_data,
        });

        if self.clicked == Some(button) {
            self.clicked = None;
            return true;
        }
        false
    }

    /// Start of every simulation tick
    pub fn update(&mut self) {
        self.elements.clear();
    }
}
