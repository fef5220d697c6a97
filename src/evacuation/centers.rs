use super::EvacuationCenter;

pub const EVACUATION_CENTERS: [EvacuationCenter; 15] = [
    EvacuationCenter {
        id: "ec-qc-01",
        name: "Quezon City Memorial Circle Evacuation Area",
        address: "Elliptical Road, Diliman, Quezon City",
        lat: 14.6515,
        lng: 121.0493,
        capacity: "5,000 persons",
        phone: "(02) 8988-4242",
        facilities: &["Open grounds", "Portable toilets", "Medical tent", "Water station"],
        city: "Quezon City",
    },
    EvacuationCenter {
        id: "ec-qc-02",
        name: "Batasan Hills National High School",
        address: "IBP Road, Batasan Hills, Quezon City",
        lat: 14.6869,
        lng: 121.0965,
        capacity: "1,200 persons",
        phone: "(02) 8931-5478",
        facilities: &["Classrooms", "Covered court", "Restrooms", "Kitchen"],
        city: "Quezon City",
    },
    EvacuationCenter {
        id: "ec-mnl-01",
        name: "Rizal Memorial Sports Complex",
        address: "Pablo Ocampo Sr. Street, Malate, Manila",
        lat: 14.5636,
        lng: 120.9926,
        capacity: "3,500 persons",
        phone: "(02) 8525-2206",
        facilities: &["Gymnasium", "Bleachers", "Restrooms", "Medical station", "Generator"],
        city: "Manila",
    },
    EvacuationCenter {
        id: "ec-mnl-02",
        name: "Delpan Sports Complex",
        address: "Delpan Street, Tondo, Manila",
        lat: 14.6017,
        lng: 120.9655,
        capacity: "1,500 persons",
        phone: "(02) 8251-6021",
        facilities: &["Covered court", "Restrooms", "Kitchen", "Sleeping area"],
        city: "Manila",
    },
    EvacuationCenter {
        id: "ec-mkt-01",
        name: "Makati Coliseum",
        address: "Sen. Gil Puyat Avenue, Makati",
        lat: 14.5637,
        lng: 121.0147,
        capacity: "2,000 persons",
        phone: "(02) 8870-1000",
        facilities: &["Arena floor", "Restrooms", "Medical station", "Generator"],
        city: "Makati",
    },
    EvacuationCenter {
        id: "ec-psg-01",
        name: "Pasig City Sports Center",
        address: "Caruncho Avenue, Malinao, Pasig",
        lat: 14.5605,
        lng: 121.0785,
        capacity: "1,800 persons",
        phone: "(02) 8643-1111",
        facilities: &["Gymnasium", "Restrooms", "Kitchen", "Water station"],
        city: "Pasig",
    },
    EvacuationCenter {
        id: "ec-mrk-01",
        name: "Marikina Sports Center",
        address: "Shoe Avenue, Sta. Elena, Marikina",
        lat: 14.6330,
        lng: 121.0977,
        capacity: "3,000 persons",
        phone: "(02) 8646-2360",
        facilities: &["Gymnasium", "Oval", "Restrooms", "Medical station", "Kitchen"],
        city: "Marikina",
    },
    EvacuationCenter {
        id: "ec-tgg-01",
        name: "Taguig City University Gymnasium",
        address: "Gen. Santos Avenue, Central Bicutan, Taguig",
        lat: 14.4906,
        lng: 121.0505,
        capacity: "1,000 persons",
        phone: "(02) 8789-3200",
        facilities: &["Gymnasium", "Classrooms", "Restrooms"],
        city: "Taguig",
    },
    EvacuationCenter {
        id: "ec-mnd-01",
        name: "Mandaluyong City Hall Grounds",
        address: "Maysilo Circle, Mandaluyong",
        lat: 14.5778,
        lng: 121.0340,
        capacity: "800 persons",
        phone: "(02) 8532-5001",
        facilities: &["Open grounds", "Restrooms", "Water station"],
        city: "Mandaluyong",
    },
    EvacuationCenter {
        id: "ec-cal-01",
        name: "Caloocan City Sports Complex",
        address: "Bagong Silang, Caloocan",
        lat: 14.7753,
        lng: 121.0449,
        capacity: "2,500 persons",
        phone: "(02) 8288-8811",
        facilities: &["Gymnasium", "Restrooms", "Kitchen", "Generator"],
        city: "Caloocan",
    },
    EvacuationCenter {
        id: "ec-val-01",
        name: "Valenzuela City Astrodome",
        address: "Maysan Road, Valenzuela",
        lat: 14.6969,
        lng: 120.9822,
        capacity: "1,600 persons",
        phone: "(02) 8352-1000",
        facilities: &["Dome arena", "Restrooms", "Medical station"],
        city: "Valenzuela",
    },
    EvacuationCenter {
        id: "ec-pque-01",
        name: "Paranaque City Evacuation Center",
        address: "Dr. A. Santos Avenue, San Dionisio, Paranaque",
        lat: 14.4793,
        lng: 121.0198,
        capacity: "1,200 persons",
        phone: "(02) 8826-8201",
        facilities: &["Dormitory halls", "Restrooms", "Kitchen", "Water station"],
        city: "Paranaque",
    },
    EvacuationCenter {
        id: "ec-lp-01",
        name: "Las Pinas City Gymnasium",
        address: "Alabang-Zapote Road, Las Pinas",
        lat: 14.4445,
        lng: 120.9939,
        capacity: "900 persons",
        phone: "(02) 8871-0011",
        facilities: &["Gymnasium", "Restrooms"],
        city: "Las Pinas",
    },
    EvacuationCenter {
        id: "ec-mun-01",
        name: "Muntinlupa Sports Center",
        address: "Centennial Avenue, Tunasan, Muntinlupa",
        lat: 14.4081,
        lng: 121.0415,
        capacity: "1,400 persons",
        phone: "(02) 8862-2525",
        facilities: &["Gymnasium", "Restrooms", "Medical station", "Kitchen"],
        city: "Muntinlupa",
    },
    EvacuationCenter {
        id: "ec-sj-01",
        name: "San Juan City Gymnasium",
        address: "N. Domingo Street, San Juan",
        lat: 14.6019,
        lng: 121.0355,
        capacity: "700 persons",
        phone: "(02) 8724-0111",
        facilities: &["Gymnasium", "Restrooms", "Water station"],
        city: "San Juan",
    },
];
