use pad::PadStr;

pub struct Table {
    ncol: usize,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn with_capacity(size: usize) -> Table {
        Table {
            ncol: 0,
            rows: Vec::with_capacity(size),
        }
    }

    /// Adds a row; the first row added is the title row. Every row must have
    /// as many cells as the title row.
    pub fn add(&mut self, row: Vec<String>) {
        if self.ncol == 0 {
            self.ncol = row.len();
        }
        assert_eq!(row.len(), self.ncol, "unexpected row len");
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut pads = vec![0; self.ncol];
        for row in self.rows.iter() {
            for (coli, cell) in row.iter().enumerate() {
                let size = console::measure_text_width(cell);
                if size > pads[coli] {
                    pads[coli] = size;
                }
            }
        }

        let mut split = String::from("+");
        for pad in pads.iter() {
            split.push_str(&"-".repeat(*pad + 2));
            split.push('+');
        }

        let mut out = String::new();
        out.push_str(&split);
        out.push('\n');
        for (rowi, row) in self.rows.iter().enumerate() {
            out.push('|');
            for (coli, cell) in row.iter().enumerate() {
                let text = cell.pad_to_width_with_alignment(pads[coli], pad::Alignment::Left);
                out.push_str(&format!(" {text} |"));
            }
            out.push('\n');

            if rowi == 0 {
                out.push_str(&split);
                out.push('\n');
            }
        }
        if self.rows.len() > 1 {
            out.push_str(&split);
            out.push('\n');
        }
        out
    }

    pub fn show(&self) {
        print!("{}", self.render());
    }
}
