//! Marshal capabilities inherited from ancestor classes.

use vc_marshal::derive::{Class, Marshal};
use vc_marshal::info::{Class as _, MAX_CAPABILITY_HOPS};
use vc_marshal::{ConfigError, Marshal, Value, validate};

#[derive(Marshal, Debug, PartialEq, Clone)]
struct Entity {
    id: i64,
    name: String,
}

#[derive(Class, Debug, PartialEq, Clone)]
#[class(parent = Entity)]
struct Player(Entity);

impl AsRef<Entity> for Player {
    fn as_ref(&self) -> &Entity {
        &self.0
    }
}

impl From<Entity> for Player {
    fn from(entity: Entity) -> Self {
        Self(entity)
    }
}

#[derive(Class, Debug, PartialEq, Clone)]
#[class(parent = Player)]
struct Admin(Player);

impl AsRef<Player> for Admin {
    fn as_ref(&self) -> &Player {
        &self.0
    }
}

impl From<Player> for Admin {
    fn from(player: Player) -> Self {
        Self(player)
    }
}

#[derive(Marshal, Debug, PartialEq)]
struct Server {
    owner: Admin,
    players: Vec<Player>,
}

fn entity(id: i64, name: &str) -> Entity {
    Entity {
        id,
        name: name.into(),
    }
}

#[test]
fn capability_comes_from_the_nearest_ancestor() {
    let capability = Admin::class_info().capability().unwrap().unwrap();
    assert_eq!(capability.provider().name(), "Entity");
    assert_eq!(capability.hops(), 2);

    let capability = Entity::class_info().capability().unwrap().unwrap();
    assert_eq!(capability.hops(), 0);
}

#[test]
fn descendants_marshal_through_the_ancestor() {
    let server = Server {
        owner: Admin(Player(entity(1, "root"))),
        players: vec![Player(entity(2, "alice")), Player(entity(3, "bob"))],
    };

    let map = server.marshal();
    let owner = map["owner"].as_map().unwrap();
    assert_eq!(owner["id"], Value::Int(1));
    assert_eq!(owner["name"], Value::from("root"));
    assert_eq!(map["players"].as_list().unwrap().len(), 2);

    assert_eq!(Server::unmarshal(&map).unwrap(), server);
}

#[test]
fn capability_walk_respects_a_smaller_bound() {
    assert!(Admin::class_info().capability_within(2).unwrap().is_some());
    assert_eq!(
        Admin::class_info().capability_within(1).unwrap_err(),
        ConfigError::CapabilityDepthExceeded {
            type_name: "Admin",
            max_hops: 1,
        }
    );
}

// -----------------------------------------------------------------------------
// Cyclic ancestry

#[derive(Class)]
#[class(parent = Yang)]
struct Yin(Box<Yang>);

#[derive(Class)]
#[class(parent = Yin)]
struct Yang(Box<Yin>);

impl AsRef<Yang> for Yin {
    fn as_ref(&self) -> &Yang {
        &self.0
    }
}

impl From<Yang> for Yin {
    fn from(yang: Yang) -> Self {
        Self(Box::new(yang))
    }
}

impl AsRef<Yin> for Yang {
    fn as_ref(&self) -> &Yin {
        &self.0
    }
}

impl From<Yin> for Yang {
    fn from(yin: Yin) -> Self {
        Self(Box::new(yin))
    }
}

#[derive(Marshal)]
struct Knot {
    yin: Yin,
}

#[test]
fn cyclic_ancestry_hits_the_hop_bound() {
    let expected = ConfigError::CapabilityDepthExceeded {
        type_name: "Yin",
        max_hops: MAX_CAPABILITY_HOPS,
    };
    assert_eq!(validate::<Knot>(), Err(expected.clone()));
    assert_eq!(Yin::class_info().capability().unwrap_err(), expected);
}
