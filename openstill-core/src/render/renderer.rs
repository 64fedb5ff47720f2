//! Dirty-tracking display renderer
//!
//! Draws process readings onto a [`CharacterDisplay`]. Temperature slots
//! are redrawn only when their raw value changed since the last redraw;
//! every write is preceded by an explicit cursor move so no field depends
//! on where the previous one ended.

use openstill_display::{CharacterDisplay, DisplayError, Glyph};

use super::cache::FieldCache;
use super::layout::{
    self, FieldSpec, BANNER, DERIVED_MAX, FLOW_RATE, HEAD_ABV, HEATER, IP_ADDRESS, LCD_COLUMNS, LCD_ROWS,
    NAME_WIDTH, POWER, READING_WRAP, TANK_ALCOHOL, TEMP_WIDTH, WEIGHT,
};
use super::trend::Trend;
use crate::config::{SlotLabels, StillConfig};
use crate::reading::{Reading, Slot};
use crate::traits::{AlcoholCalculator, CalcError, SlotNames};

/// Front panel renderer
///
/// Owns the display and the field cache. Generic over the display, the
/// alcohol calculator and the source of slot names so each can be swapped
/// for a test double.
pub struct DisplayRenderer<D, C, N> {
    display: D,
    calculator: C,
    names: N,
    /// Wash tank capacity in litres
    tank_size_l: f32,
    cache: FieldCache,
}

impl<D, C, N> DisplayRenderer<D, C, N>
where
    D: CharacterDisplay,
    C: AlcoholCalculator,
    N: SlotNames,
{
    /// Bring up a 20x4 display and register the custom glyphs
    pub fn new(display: D, calculator: C, names: N, tank_size_l: f32) -> Result<Self, DisplayError> {
        Self::with_geometry(display, calculator, names, tank_size_l, LCD_COLUMNS, LCD_ROWS)
    }

    fn with_geometry(
        display: D,
        calculator: C,
        names: N,
        tank_size_l: f32,
        cols: u8,
        rows: u8,
    ) -> Result<Self, DisplayError> {
        let mut renderer = Self {
            display,
            calculator,
            names,
            tank_size_l,
            cache: FieldCache::new(),
        };
        renderer.start(cols, rows)?;
        Ok(renderer)
    }

    /// Start-up sequence: backlight, controller init, banner, glyphs
    fn start(&mut self, cols: u8, rows: u8) -> Result<(), DisplayError> {
        self.display.set_backlight(true)?;
        self.display.begin(cols, rows)?;
        self.display.print(BANNER)?;

        for glyph in Glyph::ALL {
            self.display.create_glyph(glyph.index(), &glyph.bitmap())?;
        }

        info!("Display started ({}x{})", cols, rows);
        Ok(())
    }

    /// Render a snapshot of readings
    ///
    /// Slots whose raw temperature equals the cached value are skipped.
    /// The derived fields and the power percentage are redrawn every call.
    pub fn render(&mut self, reading: &Reading) -> Result<(), DisplayError> {
        for slot in Slot::ALL {
            self.render_slot(slot, reading.temperature(slot))?;
        }

        self.print_head_abv(reading.temperature(Slot::Header))?;
        self.print_tank_alcohol(reading.temperature(Slot::Tank))?;
        self.print_power(reading.power_percent)
    }

    /// Redraw one slot if its value changed
    ///
    /// Returns whether the slot was redrawn. The cache is only updated
    /// once the whole line has been written.
    fn render_slot(&mut self, slot: Slot, temp_c: f32) -> Result<bool, DisplayError> {
        if !self.cache.is_dirty(slot, temp_c) {
            return Ok(false);
        }

        let previous = self.cache.get(slot);
        let spec = layout::slot_field(slot);

        self.display.set_cursor(spec.col, spec.row)?;
        self.display.print_fmt(format_args!(
            "{:>w$.w$}:",
            self.names.slot_name(slot),
            w = NAME_WIDTH
        ))?;

        // Negative readings are shown as 0.00 (max also maps NaN to 0)
        let shown = temp_c.max(0.0);
        self.display
            .print_fmt(format_args!("{:w$.2}", shown, w = TEMP_WIDTH))?;

        let trend = Trend::between(temp_c, previous);
        self.display.write_glyph(trend.glyph().index())?;

        self.cache.store(slot, temp_c);
        trace!("Slot {} redrawn", slot.index());
        Ok(true)
    }

    /// Head ABV derived from the vapour temperature
    ///
    /// Shown in the 0.0 to 99.9 range; anything outside is pinned to the
    /// nearest bound so the field keeps its width.
    fn print_head_abv(&mut self, header_c: f32) -> Result<(), DisplayError> {
        let estimate = self.calculator.abv_from_head_vapour_temperature(header_c);
        match estimate {
            Ok(abv) => self.print_derived(HEAD_ABV, Glyph::Head, |d, w| {
                let abv = fit_derived(abv);
                d.print_fmt(format_args!("{:>w$.1}%", abv, w = w - 1))
            }),
            Err(e) => self.blank_derived(HEAD_ABV, e),
        }
    }

    /// Alcohol left in the wash, derived from the tank temperature
    ///
    /// Pinned to 0.0 to 99.9 litres like the head ABV.
    fn print_tank_alcohol(&mut self, tank_c: f32) -> Result<(), DisplayError> {
        let estimate = self
            .calculator
            .alcohol_volume_from_wash_boiling_temperature(tank_c, self.tank_size_l);
        match estimate {
            Ok(litres) => self.print_derived(TANK_ALCOHOL, Glyph::Tank, |d, w| {
                let litres = fit_derived(litres);
                d.print_fmt(format_args!("{:<w$.1}L", litres, w = w - 1))
            }),
            Err(e) => self.blank_derived(TANK_ALCOHOL, e),
        }
    }

    /// Glyph followed by a value formatted into the remaining width
    fn print_derived<F>(&mut self, spec: FieldSpec, glyph: Glyph, body: F) -> Result<(), DisplayError>
    where
        F: FnOnce(&mut D, usize) -> Result<(), DisplayError>,
    {
        self.display.set_cursor(spec.col, spec.row)?;
        self.display.write_glyph(glyph.index())?;
        body(&mut self.display, spec.width - 1)
    }

    /// Blank a derived field, same width as its success rendering
    fn blank_derived(&mut self, spec: FieldSpec, cause: CalcError) -> Result<(), DisplayError> {
        debug!("Derived field at row {} blanked: {:?}", spec.row, cause);
        self.display.set_cursor(spec.col, spec.row)?;
        self.display.print(&spec.blank())
    }

    fn print_power(&mut self, percent: u8) -> Result<(), DisplayError> {
        self.display.set_cursor(POWER.col, POWER.row)?;
        self.display.print_fmt(format_args!("PWR:{:3}%", percent))
    }

    /// Show the address the device got after joining the network
    ///
    /// The banner covers the slot line on its row, so that slot is redrawn
    /// on the next render.
    pub fn print_ip_address(&mut self, ip: &str) -> Result<(), DisplayError> {
        for slot in Slot::ALL {
            if slot.row() == IP_ADDRESS.row {
                self.cache.invalidate_slot(slot);
            }
        }
        self.display.set_cursor(IP_ADDRESS.col, IP_ADDRESS.row)?;
        self.display.print("WiFi ")?;
        self.display.print(ip)
    }

    /// Show the distillate weight in grams
    pub fn print_weight(&mut self, weight_g: f32) -> Result<(), DisplayError> {
        self.display.set_cursor(WEIGHT.col, WEIGHT.row)?;
        self.display
            .print_fmt(format_args!("{:5}g", wrap_reading(weight_g)))
    }

    /// Show the distillate flow rate
    pub fn print_flow_rate(&mut self, flow_rate: f32) -> Result<(), DisplayError> {
        self.display.set_cursor(FLOW_RATE.col, FLOW_RATE.row)?;
        self.display
            .print_fmt(format_args!("{:5}", wrap_reading(flow_rate)))?;
        self.display.write_glyph(Glyph::Flow.index())
    }

    /// Show a heater percentage set from outside the control loop
    pub fn print_heater_value(&mut self, percent: u8) -> Result<(), DisplayError> {
        self.display.set_cursor(HEATER.col, HEATER.row)?;
        self.display.print_fmt(format_args!("HTR:{:3}%", percent))
    }

    /// Clear the display, e.g. on a mode change
    ///
    /// The cache is invalidated as well: nothing is shown any more, so the
    /// next render redraws every slot.
    pub fn reset(&mut self) -> Result<(), DisplayError> {
        self.display.clear()?;
        self.cache.invalidate();
        Ok(())
    }

    /// Force every slot to be redrawn on the next render
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Last values drawn per slot
    pub fn cache(&self) -> &FieldCache {
        &self.cache
    }

    /// The display being rendered to
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Tear down and return the collaborators
    pub fn into_parts(self) -> (D, C, N) {
        (self.display, self.calculator, self.names)
    }
}

impl<'a, D, C> DisplayRenderer<D, C, &'a SlotLabels>
where
    D: CharacterDisplay,
    C: AlcoholCalculator,
{
    /// Bring up the display described by the configuration
    pub fn from_config(
        display: D,
        calculator: C,
        config: &'a StillConfig,
    ) -> Result<Self, DisplayError> {
        Self::with_geometry(
            display,
            calculator,
            &config.labels,
            config.tank_size_l,
            config.lcd.columns,
            config.lcd.rows,
        )
    }
}

/// Pin a derived value into the range its field can show (NaN shows as 0)
fn fit_derived(value: f32) -> f32 {
    value.max(0.0).min(DERIVED_MAX)
}

/// Truncate to whole units and wrap into five digits
fn wrap_reading(value: f32) -> i32 {
    (value as i32) % READING_WRAP
}
