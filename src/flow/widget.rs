use tracing::{debug, info, warn};

use super::{AddressForm, ContactDetails, FlowError, LeadBundle, LookupStatus, Step};
use crate::config::{BrandingConfig, ConfigProvider, PricingConfig, Settings, TierKey};
use crate::editor::{EditMode, EditorError, PolygonEditor};
use crate::estimate::{estimate, tier_displays, Pitch, QuoteBreakdown, QuoteEstimate, TierDisplay};
use crate::footprint::{fallback_footprint, find_closest_building, BuildingFootprint, FootprintSource, FALLBACK_ROOF_AREA_SQFT};
use crate::geocode::{GeocodedAddress, Geocoder};
use crate::geom::roof_squares;
use crate::surface::MapSurface;

/// The resolved property behind the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub entered_address: String,
    pub geocoded: GeocodedAddress,
    pub footprint: BuildingFootprint,
}

/// One widget session: address → property → estimate → contact → done.
///
/// Contractor configuration is read once from the [`ConfigProvider`] when the
/// session is created. The session owns the polygon editor and with it the
/// map surface; a new address replaces the previous overlay.
pub struct WidgetFlow<G, F, S: MapSurface> {
    geocoder: G,
    footprints: F,
    editor: PolygonEditor<S>,
    pricing: PricingConfig,
    branding: BrandingConfig,
    search_radius_m: f64,
    map_zoom: u8,

    step: Step,
    address: AddressForm,
    pending_address: Option<String>,
    lookup: LookupStatus,
    property: Option<Property>,
    pitch: Option<Pitch>,
    tier: Option<TierKey>,
    include_removal: bool,
    include_permit: bool,
    lead: Option<LeadBundle>,
}

impl<G, F, S> WidgetFlow<G, F, S>
where G: Geocoder, F: FootprintSource, S: MapSurface {
    pub fn new<C>(config: &C, settings: &Settings, geocoder: G, footprints: F, surface: S) -> Self
    where C: ConfigProvider + ?Sized {
        Self {
            geocoder,
            footprints,
            editor: PolygonEditor::new(surface),
            pricing: config.pricing(),
            branding: config.branding(),
            search_radius_m: settings.search_radius_m,
            map_zoom: settings.map_zoom,
            step: Step::AddressEntry,
            address: AddressForm::default(),
            pending_address: None,
            lookup: LookupStatus::Idle,
            property: None,
            pitch: None,
            tier: None,
            include_removal: false,
            include_permit: false,
            lead: None,
        }
    }

    #[inline] pub fn step(&self) -> Step { self.step }
    #[inline] pub fn lookup_status(&self) -> &LookupStatus { &self.lookup }
    #[inline] pub fn address(&self) -> &AddressForm { &self.address }
    #[inline] pub fn property(&self) -> Option<&Property> { self.property.as_ref() }
    #[inline] pub fn pitch(&self) -> Option<Pitch> { self.pitch }
    #[inline] pub fn selected_tier(&self) -> Option<TierKey> { self.tier }
    #[inline] pub fn pricing(&self) -> &PricingConfig { &self.pricing }
    #[inline] pub fn branding(&self) -> &BrandingConfig { &self.branding }
    #[inline] pub fn lead(&self) -> Option<&LeadBundle> { self.lead.as_ref() }
    #[inline] pub fn editor(&self) -> &PolygonEditor<S> { &self.editor }

    /// Mutable access to the roof editor, for start/save/reset/cancel and surface gestures.
    #[inline] pub fn editor_mut(&mut self) -> &mut PolygonEditor<S> { &mut self.editor }

    /// Current roof area in ft², tracking unsaved edits.
    #[inline] pub fn roof_area_square_feet(&self) -> Option<f64> { self.editor.area_square_feet() }

    /// Register a callback for every roof-area change.
    pub fn on_area_change<L>(&mut self, listener: L) where L: FnMut(f64) + 'static {
        self.editor.on_area_change(listener);
    }

    fn require_step(&self, step: Step, action: &'static str) -> Result<(), FlowError> {
        if self.step != step {
            return Err(FlowError::WrongStep { step: self.step, action });
        }
        Ok(())
    }

    // address entry

    /// Update the address fields.
    pub fn set_address(&mut self, form: AddressForm) -> Result<(), FlowError> {
        self.require_step(Step::AddressEntry, "edit the address")?;
        if self.lookup.is_loading() {
            return Err(FlowError::LookupInProgress);
        }
        self.address = form;
        Ok(())
    }

    #[inline] pub fn can_submit(&self) -> bool { self.address.is_submittable() && !self.lookup.is_loading() }

    /// Enter the Loading state for the current address and return the text to look up.
    pub fn start_lookup(&mut self) -> Result<String, FlowError> {
        self.require_step(Step::AddressEntry, "submit an address")?;
        if self.lookup.is_loading() {
            return Err(FlowError::LookupInProgress);
        }
        let text = self.address.composed();
        if !self.address.is_submittable() {
            return Err(FlowError::AddressTooShort(text.chars().count()));
        }
        debug!("[flow] looking up {text:?}");
        self.lookup = LookupStatus::Loading;
        self.pending_address = Some(text.clone());
        Ok(text)
    }

    /// Run the geocode and footprint lookup started by [`start_lookup`](Self::start_lookup).
    ///
    /// On success the roof polygon is attached, the map is centered on the
    /// property and the flow moves to PropertyConfirmation. When no building is
    /// found a fallback square is used instead. On failure the flow stays on
    /// AddressEntry with the error recorded; resubmitting retries.
    pub fn complete_lookup(&mut self) -> Result<&Property, FlowError> {
        if !self.lookup.is_loading() {
            return Err(FlowError::NoLookupPending);
        }
        let text = self.pending_address.take().ok_or(FlowError::NoLookupPending)?;

        match self.resolve(&text) {
            Ok(property) => self.accept_property(property),
            Err(e) => {
                warn!("[flow] lookup failed for {text:?}: {e}");
                self.lookup = LookupStatus::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// [`start_lookup`](Self::start_lookup) followed by [`complete_lookup`](Self::complete_lookup).
    pub fn submit_address(&mut self) -> Result<&Property, FlowError> {
        self.start_lookup()?;
        self.complete_lookup()
    }

    fn resolve(&self, text: &str) -> Result<Property, FlowError> {
        let geocoded = self.geocoder.geocode(text)?;
        info!("[flow] {text:?} -> {} ({:.6}, {:.6})",
            geocoded.formatted_address, geocoded.location.latitude, geocoded.location.longitude);

        let footprint = match find_closest_building(&self.footprints, geocoded.location, self.search_radius_m)? {
            Some(footprint) => footprint,
            None => {
                info!("[flow] no building found, using fallback outline");
                fallback_footprint(geocoded.location)
            }
        };
        Ok(Property { entered_address: text.to_string(), geocoded, footprint })
    }

    fn accept_property(&mut self, property: Property) -> Result<&Property, FlowError> {
        let area_override = property.footprint.is_fallback().then_some(FALLBACK_ROOF_AREA_SQFT);
        if let Err(e) = self.editor.attach(property.footprint.polygon.clone(), area_override) {
            let e = FlowError::from(e);
            self.lookup = LookupStatus::Failed(e.clone());
            return Err(e);
        }
        self.editor.surface_mut().set_view(property.geocoded.location, self.map_zoom);

        self.pitch = None;
        self.tier = None;
        self.lead = None;
        self.lookup = LookupStatus::Ready;
        self.step = Step::PropertyConfirmation;
        Ok(self.property.insert(property))
    }

    // property confirmation

    /// Choose the roof pitch. Allowed while confirming the property or viewing the estimate.
    pub fn select_pitch(&mut self, pitch: Pitch) -> Result<(), FlowError> {
        if !matches!(self.step, Step::PropertyConfirmation | Step::Estimate) {
            return Err(FlowError::WrongStep { step: self.step, action: "select a pitch" });
        }
        self.pitch = Some(pitch);
        Ok(())
    }

    /// Move to the estimate once the outline is saved and a pitch is chosen.
    pub fn confirm_property(&mut self) -> Result<Step, FlowError> {
        self.require_step(Step::PropertyConfirmation, "confirm the property")?;
        if self.editor.mode() != EditMode::Viewing {
            return Err(FlowError::PolygonNotFinalized);
        }
        if self.pitch.is_none() {
            return Err(FlowError::PitchNotSelected);
        }
        self.step = Step::Estimate;
        Ok(self.step)
    }

    // estimate

    pub fn select_tier(&mut self, tier: TierKey) -> Result<(), FlowError> {
        self.require_step(Step::Estimate, "select a tier")?;
        self.tier = Some(tier);
        Ok(())
    }

    /// Include tear-off and permit line items in the breakdown.
    pub fn set_add_ons(&mut self, include_removal: bool, include_permit: bool) {
        self.include_removal = include_removal;
        self.include_permit = include_permit;
    }

    /// Estimate for an arbitrary tier at the current area and pitch.
    pub fn quote_for(&self, tier: TierKey) -> Option<QuoteEstimate> {
        let area = self.roof_area_square_feet()?;
        Some(estimate(area, self.pitch?, self.pricing.tier(tier)))
    }

    /// Estimate for the selected tier.
    pub fn quote(&self) -> Option<QuoteEstimate> { self.quote_for(self.tier?) }

    pub fn breakdown(&self) -> Option<QuoteBreakdown> {
        self.quote().map(|q| q.itemize(&self.pricing.add_ons, self.include_removal, self.include_permit))
    }

    /// Tier cards at the current area and pitch.
    pub fn tier_cards(&self) -> Vec<TierDisplay> {
        match (self.roof_area_square_feet(), self.pitch) {
            (Some(area), Some(pitch)) => tier_displays(&self.pricing, area, pitch, self.tier),
            _ => Vec::new(),
        }
    }

    pub fn proceed_to_contact(&mut self) -> Result<Step, FlowError> {
        self.require_step(Step::Estimate, "continue to contact details")?;
        if self.tier.is_none() {
            return Err(FlowError::TierNotSelected);
        }
        self.step = Step::ContactCapture;
        Ok(self.step)
    }

    // contact capture

    /// Validate contact details and finish the session with a lead bundle.
    pub fn submit_contact(&mut self, contact: ContactDetails) -> Result<&LeadBundle, FlowError> {
        self.require_step(Step::ContactCapture, "submit contact details")?;
        let contact = contact.validated()?;
        let tier = self.tier.ok_or(FlowError::TierNotSelected)?;
        let pitch = self.pitch.ok_or(FlowError::PitchNotSelected)?;
        if self.editor.mode() != EditMode::Viewing {
            return Err(FlowError::PolygonNotFinalized);
        }
        let property = self.property.as_ref().ok_or(FlowError::NoLookupPending)?;
        let roof_polygon = self.editor.original_path().cloned()
            .ok_or(FlowError::Editor(EditorError::NoPolygon))?;
        let area = self.editor.committed_area_square_feet().unwrap_or_default();

        let tier_config = self.pricing.tier(tier);
        let quote = estimate(area, pitch, tier_config);
        let breakdown = quote.itemize(&self.pricing.add_ons, self.include_removal, self.include_permit);

        let lead = LeadBundle {
            company_name: self.branding.company_name.clone(),
            entered_address: property.entered_address.clone(),
            address: property.geocoded.formatted_address.clone(),
            location: property.geocoded.location,
            footprint_id: property.footprint.id.clone(),
            roof_polygon,
            roof_area_square_feet: quote.roof_area_square_feet,
            roof_squares: roof_squares(quote.roof_area_square_feet),
            pitch,
            tier,
            tier_name: tier_config.display_name.clone(),
            price_per_square_foot: tier_config.price_per_square_foot,
            total_price: quote.total_price,
            breakdown,
            contact,
        };
        info!("[flow] lead for {} ({} {:.0})", lead.contact.full_name(), lead.tier, lead.total_price);

        self.step = Step::Complete;
        Ok(self.lead.insert(lead))
    }

    // navigation

    /// Go back one step. A no-op on the first step or while a lookup is loading.
    pub fn back(&mut self) -> Step {
        if self.lookup.is_loading() {
            return self.step;
        }
        if let Some(previous) = self.step.previous() {
            match self.step {
                Step::Complete => self.lead = None,
                Step::PropertyConfirmation => self.lookup = LookupStatus::Idle,
                _ => {}
            }
            debug!("[flow] back {} -> {previous}", self.step);
            self.step = previous;
        }
        self.step
    }

    /// Drop the current property and start again from the address.
    pub fn restart(&mut self) {
        self.editor.detach();
        self.step = Step::AddressEntry;
        self.address = AddressForm::default();
        self.pending_address = None;
        self.lookup = LookupStatus::Idle;
        self.property = None;
        self.pitch = None;
        self.tier = None;
        self.include_removal = false;
        self.include_permit = false;
        self.lead = None;
    }
}
