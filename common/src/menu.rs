use tracing::debug;

// the hamburger and the menu it reveals always share one open/closed state
pub trait MenuView {
    fn menu_open(&self) -> bool;

    fn set_menu_open(&self, open: bool);
}

pub fn toggle_mobile_menu<V: MenuView + ?Sized>(view: &V) -> bool {
    let open = !view.menu_open();
    debug!(open, "toggling mobile menu");

    view.set_menu_open(open);
    open
}

pub fn close_mobile_menu<V: MenuView + ?Sized>(view: &V) {
    if view.menu_open() {
        debug!("closing mobile menu");
        view.set_menu_open(false);
    }
}

// widening past the breakpoint means the desktop nav is showing again
pub fn closes_on_resize(width: f64, breakpoint: f64) -> bool {
    width > breakpoint
}
