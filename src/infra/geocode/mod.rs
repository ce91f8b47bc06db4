pub mod nominatim_service;
