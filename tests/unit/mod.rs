mod pricing_properties;
mod quote_pipeline;
mod round_trip;
