mod overlay_view;
mod overview_page;
mod settings_page;

mod mirror_view;

use gpui::{
    AnyView, AppContext, Context, Entity, InteractiveElement, IntoElement, MouseButton,
    MouseMoveEvent, MouseUpEvent,
    ParentElement, Render, Styled, Window, div, prelude::FluentBuilder,
};
use gpui_component::{
    IconName, Root, Side,
    sidebar::{Sidebar, SidebarGroup, SidebarHeader, SidebarMenu, SidebarMenuItem},
};

use crate::{
    entities::DataEntities,
    views::{overlay_view::OverlayView, overview_page::OverviewPage, settings_page::SettingsPage},
};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PageUi {
    Overview,
    Settings,
}

pub struct FrontendUi {
    data: DataEntities,
    active_page: PageUi,
    active_page_view: AnyView,
    /// The floating overlay, mounted while the overlay entity is enabled.
    overlay: Option<Entity<OverlayView>>,
    /// Whether the platform can host the always-on-top mirror window.
    /// Probed once at startup; when `false` the mirror affordance is hidden.
    mirror_supported: bool,
}

impl FrontendUi {
    pub fn new(data: &DataEntities, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let initial_view = cx.new(|cx| OverviewPage::new(data, window, cx)).into();
        let mirror_supported = !cx.displays().is_empty();

        let overlay_entity = data.overlay.clone();
        cx.observe_in(&overlay_entity, window, |this, overlay_entity, window, cx| {
            let enabled = overlay_entity.read(cx).enabled;
            if enabled && this.overlay.is_none() {
                let mirror_supported = this.mirror_supported;
                let data = this.data.clone();
                this.overlay =
                    Some(cx.new(|cx| OverlayView::new(&data, mirror_supported, window, cx)));
            } else if !enabled && let Some(overlay) = this.overlay.take() {
                // The mirror window cascades with its overlay.
                overlay.update(cx, |overlay, cx| overlay.overlay_closed(cx));
            }
            cx.notify();
        })
        .detach();

        Self {
            data: data.clone(),
            active_page: PageUi::Overview,
            active_page_view: initial_view,
            overlay: None,
            mirror_supported,
        }
    }

    pub fn change_page(&mut self, page: PageUi, window: &mut Window, cx: &mut Context<Self>) {
        let new_page = match page {
            PageUi::Overview => cx
                .new(|cx| OverviewPage::new(&self.data, window, cx))
                .into(),
            PageUi::Settings => cx.new(|cx| SettingsPage::new(&self.data, cx)).into(),
        };
        self.active_page = page;
        self.active_page_view = new_page;
        cx.notify();
    }
}

impl Render for FrontendUi {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let notification_layer = Root::render_notification_layer(window, cx);
        let on_page_change = |page| {
            cx.listener(move |this, _, window, cx| {
                this.change_page(page, window, cx);
            })
        };

        div()
            .relative()
            .flex()
            .size_full()
            // Pointer tracking lives on the root so a drag keeps following
            // the cursor outside the overlay and a release anywhere ends it.
            .on_mouse_move(cx.listener(|this, event: &MouseMoveEvent, window, cx| {
                if let Some(overlay) = this.overlay.as_ref() {
                    overlay.update(cx, |overlay, cx| {
                        overlay.pointer_moved(event.position, window, cx)
                    });
                }
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, _: &MouseUpEvent, _, cx| {
                    if let Some(overlay) = this.overlay.as_ref() {
                        overlay.update(cx, |overlay, cx| overlay.pointer_up(cx));
                    }
                }),
            )
            .child(
                Sidebar::new(Side::Left)
                    .header(SidebarHeader::new().child("postwin"))
                    .child(
                        SidebarGroup::new("Navigation").child(
                            SidebarMenu::new()
                                .child(
                                    SidebarMenuItem::new("Overview")
                                        .active(self.active_page == PageUi::Overview)
                                        .icon(IconName::LayoutDashboard)
                                        .on_click(on_page_change(PageUi::Overview)),
                                )
                                .child(
                                    SidebarMenuItem::new("Settings")
                                        .active(self.active_page == PageUi::Settings)
                                        .icon(IconName::Settings)
                                        .on_click(on_page_change(PageUi::Settings)),
                                ),
                        ),
                    ),
            )
            .child(div().p_5().size_full().child(self.active_page_view.clone()))
            .when_some(self.overlay.clone(), |this, overlay| this.child(overlay))
            .children(notification_layer)
    }
}
