const SPINNER_CHARS: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

#[derive(Debug, Default, Clone)]
pub struct Spinner {
    current_frame: usize,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.current_frame = (self.current_frame + 1) % SPINNER_CHARS.len();
    }

    pub fn get_frame(&self) -> char {
        SPINNER_CHARS[self.current_frame]
    }
}

pub fn spinner_frame(spinner: &Spinner) -> String {
    format!(" The city is thinking... {} ", spinner.get_frame())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_cycles_through_every_frame() {
        let mut spinner = Spinner::new();
        let first = spinner.get_frame();
        for _ in 0..SPINNER_CHARS.len() {
            spinner.tick();
        }
        assert_eq!(spinner.get_frame(), first);
    }
}
